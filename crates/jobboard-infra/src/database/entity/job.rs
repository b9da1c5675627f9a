//! Job entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use jobboard_core::domain;

/// Stored job status discriminator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum JobStatus {
    #[sea_orm(string_value = "Draft")]
    Draft,
    #[sea_orm(string_value = "Open")]
    Open,
    #[sea_orm(string_value = "Closed")]
    Closed,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "jobs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub location: Option<String>,
    pub status: JobStatus,
    pub created_by: Uuid,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatedBy",
        to = "super::user::Column::Id"
    )]
    Creator,
    #[sea_orm(has_many = "super::application::Entity")]
    Applications,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl Related<super::application::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Applications.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<JobStatus> for domain::JobStatus {
    fn from(status: JobStatus) -> Self {
        match status {
            JobStatus::Draft => domain::JobStatus::Draft,
            JobStatus::Open => domain::JobStatus::Open,
            JobStatus::Closed => domain::JobStatus::Closed,
        }
    }
}

impl From<domain::JobStatus> for JobStatus {
    fn from(status: domain::JobStatus) -> Self {
        match status {
            domain::JobStatus::Draft => JobStatus::Draft,
            domain::JobStatus::Open => JobStatus::Open,
            domain::JobStatus::Closed => JobStatus::Closed,
        }
    }
}

impl From<Model> for domain::Job {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            location: model.location,
            status: model.status.into(),
            created_by: model.created_by,
            created_at: model.created_at.into(),
        }
    }
}

impl From<domain::Job> for ActiveModel {
    fn from(job: domain::Job) -> Self {
        Self {
            id: Set(job.id),
            title: Set(job.title),
            description: Set(job.description),
            location: Set(job.location),
            status: Set(job.status.into()),
            created_by: Set(job.created_by),
            created_at: Set(job.created_at.into()),
        }
    }
}
