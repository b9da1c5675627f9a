//! Application entity for SeaORM.
//!
//! The table carries a composite unique constraint on
//! (applicant_id, job_id); that constraint, not the pre-insert lookup, is
//! what actually guarantees one application per applicant per job.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use jobboard_core::domain;

/// Stored application status discriminator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum ApplicationStatus {
    #[sea_orm(string_value = "Applied")]
    Applied,
    #[sea_orm(string_value = "Reviewed")]
    Reviewed,
    #[sea_orm(string_value = "Interview")]
    Interview,
    #[sea_orm(string_value = "Rejected")]
    Rejected,
    #[sea_orm(string_value = "Hired")]
    Hired,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "applications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub applicant_id: Uuid,
    pub job_id: Uuid,
    pub resume_url: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub cover_letter: Option<String>,
    pub status: ApplicationStatus,
    pub applied_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ApplicantId",
        to = "super::user::Column::Id"
    )]
    Applicant,
    #[sea_orm(
        belongs_to = "super::job::Entity",
        from = "Column::JobId",
        to = "super::job::Column::Id"
    )]
    Job,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Applicant.def()
    }
}

impl Related<super::job::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Job.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<ApplicationStatus> for domain::ApplicationStatus {
    fn from(status: ApplicationStatus) -> Self {
        match status {
            ApplicationStatus::Applied => domain::ApplicationStatus::Applied,
            ApplicationStatus::Reviewed => domain::ApplicationStatus::Reviewed,
            ApplicationStatus::Interview => domain::ApplicationStatus::Interview,
            ApplicationStatus::Rejected => domain::ApplicationStatus::Rejected,
            ApplicationStatus::Hired => domain::ApplicationStatus::Hired,
        }
    }
}

impl From<domain::ApplicationStatus> for ApplicationStatus {
    fn from(status: domain::ApplicationStatus) -> Self {
        match status {
            domain::ApplicationStatus::Applied => ApplicationStatus::Applied,
            domain::ApplicationStatus::Reviewed => ApplicationStatus::Reviewed,
            domain::ApplicationStatus::Interview => ApplicationStatus::Interview,
            domain::ApplicationStatus::Rejected => ApplicationStatus::Rejected,
            domain::ApplicationStatus::Hired => ApplicationStatus::Hired,
        }
    }
}

impl From<Model> for domain::Application {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            applicant_id: model.applicant_id,
            job_id: model.job_id,
            resume_url: model.resume_url,
            cover_letter: model.cover_letter,
            status: model.status.into(),
            applied_at: model.applied_at.into(),
        }
    }
}

impl From<domain::Application> for ActiveModel {
    fn from(application: domain::Application) -> Self {
        Self {
            id: Set(application.id),
            applicant_id: Set(application.applicant_id),
            job_id: Set(application.job_id),
            resume_url: Set(application.resume_url),
            cover_letter: Set(application.cover_letter),
            status: Set(application.status.into()),
            applied_at: Set(application.applied_at.into()),
        }
    }
}
