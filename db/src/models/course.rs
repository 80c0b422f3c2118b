use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{FromJsonQueryResult, QueryOrder, Set};
use serde::{Deserialize, Serialize};

/// Ordered list of relative storage paths, persisted as a JSON array.
///
/// Order matters (it is the display order in the admin panel) and duplicates
/// are allowed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct ImageList(pub Vec<String>);

impl From<Vec<String>> for ImageList {
    fn from(paths: Vec<String>) -> Self {
        Self(paths)
    }
}

impl ImageList {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

/// Represents a course in the `courses` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub name: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    pub instructor: String,

    /// Relative storage paths of the course images, in display order.
    #[sea_orm(column_type = "Json")]
    pub images: ImageList,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        name: &str,
        description: &str,
        instructor: &str,
        images: Vec<String>,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let course = ActiveModel {
            name: Set(name.to_owned()),
            description: Set(description.to_owned()),
            instructor: Set(instructor.to_owned()),
            images: Set(ImageList(images)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        course.insert(db).await
    }

    pub async fn find(db: &DbConn, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    /// All courses, oldest first.
    pub async fn list(db: &DbConn) -> Result<Vec<Model>, DbErr> {
        Entity::find().order_by_asc(Column::Id).all(db).await
    }

    /// Overwrites the editable fields and the image list of one course.
    ///
    /// Returns the number of rows the statement matched, so callers can tell a
    /// vanished row (0) apart from a successful write.
    pub async fn overwrite(
        db: &DbConn,
        id: i64,
        name: &str,
        description: &str,
        instructor: &str,
        images: Vec<String>,
    ) -> Result<u64, DbErr> {
        let res = Entity::update_many()
            .col_expr(Column::Name, Expr::value(name.to_owned()))
            .col_expr(Column::Description, Expr::value(description.to_owned()))
            .col_expr(Column::Instructor, Expr::value(instructor.to_owned()))
            .col_expr(Column::Images, Expr::value(ImageList(images)))
            .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(Column::Id.eq(id))
            .exec(db)
            .await?;

        Ok(res.rows_affected)
    }

    /// Deletes a course row. Returns the number of rows removed.
    pub async fn delete_by_id(db: &DbConn, id: i64) -> Result<u64, DbErr> {
        let res = Entity::delete_by_id(id).exec(db).await?;
        Ok(res.rows_affected)
    }
}
