//! Read-only catalog of orders and boundary data in PostgreSQL.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::{postgres::PgPoolOptions, types::Json, FromRow, PgPool};

use order_common::{OrderError, OrderResult};

use crate::models::{
    AdministrativeDivisionRecord, DatasetRepresentationRecord, OrderItemRecord, OrderRecord,
    RegionRecord,
};

/// Database connection pool and catalog queries.
pub struct Catalog {
    pool: PgPool,
}

/// Optional filters for listing administrative divisions.
#[derive(Debug, Clone, Default)]
pub struct DivisionFilter {
    pub level: Option<i32>,
    pub iso: Option<String>,
}

impl Catalog {
    /// Create a new catalog connection from database URL.
    pub async fn connect(database_url: &str) -> OrderResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .map_err(|e| OrderError::DatabaseError(format!("Connection failed: {}", e)))?;

        tracing::info!(max_connections = 10, "Connected to catalog database");
        Ok(Self { pool })
    }

    /// Create a catalog that opens connections on first use.
    pub fn connect_lazy(database_url: &str) -> OrderResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_lazy(database_url)
            .map_err(|e| OrderError::DatabaseError(format!("Invalid database URL: {}", e)))?;

        Ok(Self { pool })
    }

    /// Check database connectivity.
    pub async fn ping(&self) -> OrderResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(query_failed)?;
        Ok(())
    }

    /// Get an order by id.
    pub async fn get_order(&self, id: i64) -> OrderResult<Option<OrderRecord>> {
        let row = sqlx::query_as::<_, OrderRow>(
            "SELECT id, status, additional_status_info, created_on \
             FROM orders WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(query_failed)?;

        Ok(row.map(|r| r.into()))
    }

    /// Get all items of an order, across its batches.
    pub async fn list_order_items(&self, order_id: i64) -> OrderResult<Vec<OrderItemRecord>> {
        let rows = sqlx::query_as::<_, OrderItemRow>(&format!(
            "{} WHERE b.order_id = $1 ORDER BY i.id",
            ORDER_ITEM_SELECT
        ))
        .bind(order_id)
        .fetch_all(&self.pool)
        .await
        .map_err(query_failed)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    /// Get a single order item by id.
    pub async fn get_order_item(&self, id: i64) -> OrderResult<Option<OrderItemRecord>> {
        let row = sqlx::query_as::<_, OrderItemRow>(&format!("{} WHERE i.id = $1", ORDER_ITEM_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed)?;

        Ok(row.map(|r| r.into()))
    }

    /// List administrative divisions matching the filter.
    pub async fn list_administrative_divisions(
        &self,
        filter: &DivisionFilter,
    ) -> OrderResult<Vec<AdministrativeDivisionRecord>> {
        let rows = sqlx::query_as::<_, DivisionRow>(&format!(
            "{} WHERE ($1::int IS NULL OR d.level = $1) \
             AND ($2::text IS NULL OR d.iso = $2) \
             GROUP BY d.id ORDER BY d.id",
            DIVISION_SELECT
        ))
        .bind(filter.level)
        .bind(filter.iso.as_deref())
        .fetch_all(&self.pool)
        .await
        .map_err(query_failed)?;

        rows.into_iter()
            .map(AdministrativeDivisionRecord::try_from)
            .collect()
    }

    /// Get an administrative division by id.
    pub async fn get_administrative_division(
        &self,
        id: i64,
    ) -> OrderResult<Option<AdministrativeDivisionRecord>> {
        let row = sqlx::query_as::<_, DivisionRow>(&format!(
            "{} WHERE d.id = $1 GROUP BY d.id",
            DIVISION_SELECT
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(query_failed)?;

        row.map(AdministrativeDivisionRecord::try_from).transpose()
    }

    /// List all regions.
    pub async fn list_regions(&self) -> OrderResult<Vec<RegionRecord>> {
        let rows = sqlx::query_as::<_, RegionRow>(
            "SELECT id, name, level FROM regions ORDER BY level, name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(query_failed)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    /// Get a region by id.
    pub async fn get_region(&self, id: i64) -> OrderResult<Option<RegionRecord>> {
        let row = sqlx::query_as::<_, RegionRow>("SELECT id, name, level FROM regions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed)?;

        Ok(row.map(|r| r.into()))
    }

    /// List all dataset representations.
    pub async fn list_dataset_representations(
        &self,
    ) -> OrderResult<Vec<DatasetRepresentationRecord>> {
        let rows = sqlx::query_as::<_, DatasetRow>(
            "SELECT id, name, dataset_type, ST_AsGeoJSON(geom) AS geometry \
             FROM dataset_representations ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(query_failed)?;

        rows.into_iter()
            .map(DatasetRepresentationRecord::try_from)
            .collect()
    }

    /// Get a dataset representation by id.
    pub async fn get_dataset_representation(
        &self,
        id: i64,
    ) -> OrderResult<Option<DatasetRepresentationRecord>> {
        let row = sqlx::query_as::<_, DatasetRow>(
            "SELECT id, name, dataset_type, ST_AsGeoJSON(geom) AS geometry \
             FROM dataset_representations WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(query_failed)?;

        row.map(DatasetRepresentationRecord::try_from).transpose()
    }
}

fn query_failed(e: sqlx::Error) -> OrderError {
    OrderError::DatabaseError(format!("Query failed: {}", e))
}

fn parse_geometry(raw: Option<String>) -> OrderResult<Option<Value>> {
    raw.map(|text| {
        serde_json::from_str(&text)
            .map_err(|e| OrderError::DatabaseError(format!("Invalid geometry: {}", e)))
    })
    .transpose()
}

const ORDER_ITEM_SELECT: &str = "SELECT i.id, b.order_id, i.identifier, i.status, \
     i.additional_status_info, i.created_on, i.expires_on, i.available, i.url, \
     i.export_options \
     FROM order_items i JOIN order_batches b ON b.id = i.batch_id";

const DIVISION_SELECT: &str = "SELECT d.id, d.level, d.iso, d.name, d.name_eng, d.name_local, \
     d.type AS division_type, d.engtype, d.unregion, d.population, d.sqkm, d.pop_sqkm, \
     d.region_id, d.parent_id, \
     COALESCE(array_agg(dd.dataset_id) FILTER (WHERE dd.dataset_id IS NOT NULL), '{}') \
         AS dataset_ids, \
     ST_AsGeoJSON(d.geom) AS geometry \
     FROM administrative_divisions d \
     LEFT JOIN administrative_division_datasets dd ON dd.division_id = d.id";

#[derive(FromRow)]
struct OrderRow {
    id: i64,
    status: String,
    additional_status_info: Option<String>,
    created_on: DateTime<Utc>,
}

impl From<OrderRow> for OrderRecord {
    fn from(row: OrderRow) -> Self {
        OrderRecord {
            id: row.id,
            status: row.status,
            additional_status_info: row.additional_status_info,
            created_on: row.created_on,
        }
    }
}

#[derive(FromRow)]
struct OrderItemRow {
    id: i64,
    order_id: i64,
    identifier: String,
    status: String,
    additional_status_info: Option<String>,
    created_on: DateTime<Utc>,
    expires_on: Option<DateTime<Utc>>,
    available: bool,
    url: Option<String>,
    export_options: Option<Json<Map<String, Value>>>,
}

impl From<OrderItemRow> for OrderItemRecord {
    fn from(row: OrderItemRow) -> Self {
        OrderItemRecord {
            id: row.id,
            order_id: row.order_id,
            identifier: row.identifier,
            status: row.status,
            additional_status_info: row.additional_status_info,
            created_on: row.created_on,
            expires_on: row.expires_on,
            available: row.available,
            url: row.url,
            export_options: row.export_options.map(|j| j.0).unwrap_or_default(),
        }
    }
}

#[derive(FromRow)]
struct DivisionRow {
    id: i64,
    level: i32,
    iso: Option<String>,
    name: String,
    name_eng: Option<String>,
    name_local: Option<String>,
    division_type: Option<String>,
    engtype: Option<String>,
    unregion: Option<String>,
    population: Option<i64>,
    sqkm: Option<f64>,
    pop_sqkm: Option<f64>,
    region_id: Option<i64>,
    parent_id: Option<i64>,
    dataset_ids: Vec<i64>,
    geometry: Option<String>,
}

impl TryFrom<DivisionRow> for AdministrativeDivisionRecord {
    type Error = OrderError;

    fn try_from(row: DivisionRow) -> OrderResult<Self> {
        Ok(AdministrativeDivisionRecord {
            id: row.id,
            level: row.level,
            iso: row.iso,
            name: row.name,
            name_eng: row.name_eng,
            name_local: row.name_local,
            division_type: row.division_type,
            engtype: row.engtype,
            unregion: row.unregion,
            population: row.population,
            sqkm: row.sqkm,
            pop_sqkm: row.pop_sqkm,
            region_id: row.region_id,
            parent_id: row.parent_id,
            dataset_ids: row.dataset_ids,
            geometry: parse_geometry(row.geometry)?,
        })
    }
}

#[derive(FromRow)]
struct RegionRow {
    id: i64,
    name: String,
    level: i32,
}

impl From<RegionRow> for RegionRecord {
    fn from(row: RegionRow) -> Self {
        RegionRecord {
            id: row.id,
            name: row.name,
            level: row.level,
        }
    }
}

#[derive(FromRow)]
struct DatasetRow {
    id: i64,
    name: String,
    dataset_type: String,
    geometry: Option<String>,
}

impl TryFrom<DatasetRow> for DatasetRepresentationRecord {
    type Error = OrderError;

    fn try_from(row: DatasetRow) -> OrderResult<Self> {
        Ok(DatasetRepresentationRecord {
            id: row.id,
            name: row.name,
            dataset_type: row.dataset_type,
            geometry: parse_geometry(row.geometry)?,
        })
    }
}
