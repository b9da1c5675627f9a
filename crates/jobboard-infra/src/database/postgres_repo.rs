//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ColumnTrait, EntityTrait, FromQueryResult, JoinType, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait,
};
use uuid::Uuid;

use jobboard_core::domain::{Application, ApplicationStatus, Job, JobStatus, User};
use jobboard_core::error::RepoError;
use jobboard_core::ports::{
    ApplicationRepository, ApplicationWithApplicant, JobFilters, JobRepository,
    JobWithApplications, RepoPage, UserRepository,
};

use super::entity::{application, job, user};
use super::postgres_base::{PostgresRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresRepository<user::Entity>;

/// PostgreSQL job repository.
pub type PostgresJobRepository = PostgresRepository<job::Entity>;

/// PostgreSQL application repository.
pub type PostgresApplicationRepository = PostgresRepository<application::Entity>;

fn contains_pattern(needle: &str) -> String {
    format!("%{needle}%")
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let result = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn mark_verified(&self, id: Uuid) -> Result<(), RepoError> {
        let result = user::Entity::update_many()
            .col_expr(user::Column::Verified, Expr::value(true))
            .filter(user::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

/// Row shape for the creator listing with aggregated application counts.
#[derive(Debug, FromQueryResult)]
struct JobWithCountRow {
    id: Uuid,
    title: String,
    description: String,
    location: Option<String>,
    status: job::JobStatus,
    created_by: Uuid,
    created_at: DateTimeWithTimeZone,
    applications_count: i64,
}

impl From<JobWithCountRow> for JobWithApplications {
    fn from(row: JobWithCountRow) -> Self {
        Self {
            job: Job {
                id: row.id,
                title: row.title,
                description: row.description,
                location: row.location,
                status: row.status.into(),
                created_by: row.created_by,
                created_at: row.created_at.into(),
            },
            applications: row.applications_count.max(0) as u64,
        }
    }
}

#[async_trait]
impl JobRepository for PostgresJobRepository {
    async fn update_guarded(
        &self,
        updated: &Job,
        expected_status: JobStatus,
    ) -> Result<bool, RepoError> {
        // Single-statement compare-and-set on the status the caller read;
        // a concurrent transition makes the filter miss and rows_affected
        // come back zero.
        let result = job::Entity::update_many()
            .col_expr(job::Column::Title, Expr::value(updated.title.clone()))
            .col_expr(
                job::Column::Description,
                Expr::value(updated.description.clone()),
            )
            .col_expr(job::Column::Location, Expr::value(updated.location.clone()))
            .col_expr(
                job::Column::Status,
                Expr::value(job::JobStatus::from(updated.status)),
            )
            .filter(job::Column::Id.eq(updated.id))
            .filter(job::Column::Status.eq(job::JobStatus::from(expected_status)))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected > 0)
    }

    async fn browse(
        &self,
        filters: &JobFilters,
        page: u64,
        size: u64,
    ) -> Result<RepoPage<Job>, RepoError> {
        let mut query = job::Entity::find();

        if let Some(title) = &filters.title {
            query = query.filter(
                Expr::col((job::Entity, job::Column::Title)).ilike(contains_pattern(title)),
            );
        }
        if let Some(location) = &filters.location {
            query = query.filter(
                Expr::col((job::Entity, job::Column::Location)).ilike(contains_pattern(location)),
            );
        }
        if let Some(company_name) = &filters.company_name {
            query = query.join(JoinType::InnerJoin, job::Relation::Creator.def()).filter(
                Expr::col((user::Entity, user::Column::Name)).ilike(contains_pattern(company_name)),
            );
        }

        let total = query.clone().count(&self.db).await.map_err(map_db_err)?;

        let models = query
            .order_by_desc(job::Column::CreatedAt)
            .paginate(&self.db, size)
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(map_db_err)?;

        Ok(RepoPage {
            items: models.into_iter().map(Into::into).collect(),
            total,
        })
    }

    async fn list_by_creator(
        &self,
        creator: Uuid,
        status: Option<JobStatus>,
        page: u64,
        size: u64,
    ) -> Result<RepoPage<JobWithApplications>, RepoError> {
        let mut query = job::Entity::find().filter(job::Column::CreatedBy.eq(creator));
        if let Some(status) = status {
            query = query.filter(job::Column::Status.eq(job::JobStatus::from(status)));
        }

        let total = query.clone().count(&self.db).await.map_err(map_db_err)?;

        let rows = query
            .join(JoinType::LeftJoin, job::Relation::Applications.def())
            .select_only()
            .columns([
                job::Column::Id,
                job::Column::Title,
                job::Column::Description,
                job::Column::Location,
                job::Column::Status,
                job::Column::CreatedBy,
                job::Column::CreatedAt,
            ])
            .column_as(application::Column::Id.count(), "applications_count")
            .group_by(job::Column::Id)
            .order_by_desc(job::Column::CreatedAt)
            .into_model::<JobWithCountRow>()
            .paginate(&self.db, size)
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(map_db_err)?;

        Ok(RepoPage {
            items: rows.into_iter().map(Into::into).collect(),
            total,
        })
    }
}

#[async_trait]
impl ApplicationRepository for PostgresApplicationRepository {
    async fn find_by_applicant_and_job(
        &self,
        applicant_id: Uuid,
        job_id: Uuid,
    ) -> Result<Option<Application>, RepoError> {
        let result = application::Entity::find()
            .filter(application::Column::ApplicantId.eq(applicant_id))
            .filter(application::Column::JobId.eq(job_id))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn count_by_job(&self, job_id: Uuid) -> Result<u64, RepoError> {
        application::Entity::find()
            .filter(application::Column::JobId.eq(job_id))
            .count(&self.db)
            .await
            .map_err(map_db_err)
    }

    async fn list_by_job(
        &self,
        job_id: Uuid,
        status: Option<ApplicationStatus>,
        page: u64,
        size: u64,
    ) -> Result<RepoPage<ApplicationWithApplicant>, RepoError> {
        let mut query = application::Entity::find().filter(application::Column::JobId.eq(job_id));
        if let Some(status) = status {
            query = query.filter(
                application::Column::Status.eq(application::ApplicationStatus::from(status)),
            );
        }

        let total = query.clone().count(&self.db).await.map_err(map_db_err)?;

        let rows = query
            .find_also_related(user::Entity)
            .order_by_desc(application::Column::AppliedAt)
            .paginate(&self.db, size)
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(map_db_err)?;

        let items = rows
            .into_iter()
            .map(|(model, applicant)| ApplicationWithApplicant {
                application: model.into(),
                applicant_name: applicant.map(|u| u.name).unwrap_or_default(),
            })
            .collect();

        Ok(RepoPage { items, total })
    }

    async fn set_status(&self, id: Uuid, status: ApplicationStatus) -> Result<(), RepoError> {
        let result = application::Entity::update_many()
            .col_expr(
                application::Column::Status,
                Expr::value(application::ApplicationStatus::from(status)),
            )
            .filter(application::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
