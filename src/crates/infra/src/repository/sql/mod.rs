pub mod album;
pub mod artist;
pub mod artist_location;
pub mod db_data;
pub mod location;
pub mod song;
pub mod staging;

use async_trait::async_trait;
use domain::schema::{SchemaDef, TableNames};
use domain::stage::Stage;
use domain::store::{PipelineStore, StageSession, StoreError};
use log::{debug, info};
use sea_orm::sea_query::{Alias, InsertStatement, SelectStatement};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DatabaseTransaction, DbErr,
    FromQueryResult, SqlErr, Statement, TransactionTrait,
};
use std::sync::Arc;
use std::time::Duration;

use db_data::col;

/// 建立连接池并执行一次探测查询
pub async fn connect(db_url: &str, max_connections: u32) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(db_url.to_string());
    opt.max_connections(max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(3))
        .acquire_timeout(Duration::from_secs(8))
        .sqlx_logging(false)
        .sqlx_logging_level(log::LevelFilter::Info);

    let db = Database::connect(opt).await?;

    let backend = db.get_database_backend();
    db.execute(Statement::from_string(backend, "SELECT 1".to_owned()))
        .await?;

    info!("Database connection pool initialized ({:?})", backend);
    Ok(db)
}

/// 唯一约束和外键冲突单独归类，其余都是普通数据库错误
pub fn store_err(e: DbErr) -> StoreError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => StoreError::Constraint(msg),
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => StoreError::Constraint(msg),
        _ => StoreError::DbErr(e.to_string()),
    }
}

pub struct SqlStore {
    db: DatabaseConnection,
    schema: Arc<SchemaDef>,
}

impl SqlStore {
    pub fn new(db: DatabaseConnection, schema: SchemaDef) -> Self {
        Self {
            db,
            schema: Arc::new(schema),
        }
    }
}

#[async_trait]
impl PipelineStore for SqlStore {
    async fn begin(&self, stage: Stage) -> Result<Box<dyn StageSession>, StoreError> {
        let txn = self.db.begin().await.map_err(store_err)?;
        debug!("Transaction opened for stage {}", stage);
        Ok(Box::new(SqlSession {
            txn,
            schema: self.schema.clone(),
        }))
    }
}

/// 一个阶段的事务；未提交就被丢弃时由 sea-orm 回滚
pub struct SqlSession {
    txn: DatabaseTransaction,
    schema: Arc<SchemaDef>,
}

impl SqlSession {
    fn tables(&self) -> &TableNames {
        self.schema.tables()
    }

    async fn fetch_all<T: FromQueryResult>(
        &self,
        stmt: &SelectStatement,
    ) -> Result<Vec<T>, StoreError> {
        let backend = self.txn.get_database_backend();
        T::find_by_statement(backend.build(stmt))
            .all(&self.txn)
            .await
            .map_err(store_err)
    }

    async fn fetch_one<T: FromQueryResult>(
        &self,
        stmt: &SelectStatement,
    ) -> Result<Option<T>, StoreError> {
        let backend = self.txn.get_database_backend();
        T::find_by_statement(backend.build(stmt))
            .one(&self.txn)
            .await
            .map_err(store_err)
    }

    async fn execute(&self, stmt: &InsertStatement) -> Result<(), StoreError> {
        let backend = self.txn.get_database_backend();
        self.txn
            .execute(backend.build(stmt))
            .await
            .map_err(store_err)?;
        Ok(())
    }

    /// Runs an INSERT ... RETURNING id and hands back the generated key.
    async fn insert_returning_id(&self, stmt: &mut InsertStatement) -> Result<i32, StoreError> {
        stmt.returning_col(Alias::new(col::ID));
        let backend = self.txn.get_database_backend();
        let row = self
            .txn
            .query_one(backend.build(&*stmt))
            .await
            .map_err(store_err)?
            .ok_or_else(|| StoreError::MissingRow(format!("{:?}", stmt)))?;
        row.try_get::<i32>("", col::ID).map_err(store_err)
    }
}

#[async_trait]
impl StageSession for SqlSession {
    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        self.txn.commit().await.map_err(store_err)
    }
}

fn values_err(e: sea_orm::sea_query::error::Error) -> StoreError {
    StoreError::DbErr(e.to_string())
}
