use sqlx::{PgPool, Row};

use starscan_core::{Error, Result, TableRef};

fn db_err(err: sqlx::Error) -> Error {
    Error::Db(err.to_string())
}

pub async fn fetch_database_name(pool: &PgPool) -> Result<String> {
    let row = sqlx::query("select current_database() as name")
        .fetch_one(pool)
        .await
        .map_err(db_err)?;
    row.try_get("name").map_err(db_err)
}

pub async fn list_tables_with_prefix(pool: &PgPool, prefix: &str) -> Result<Vec<TableRef>> {
    let rows = sqlx::query(
        r#"
        select
          n.nspname as schema,
          c.relname as name
        from pg_class c
        join pg_namespace n on n.oid = c.relnamespace
        where c.relkind in ('r', 'p')
          and starts_with(lower(c.relname), lower($1))
          and n.nspname <> 'information_schema'
          and n.nspname not like 'pg\_%'
        order by n.nspname, c.relname
        "#,
    )
    .bind(prefix)
    .fetch_all(pool)
    .await
    .map_err(db_err)?;

    rows.into_iter()
        .map(|row| {
            Ok(TableRef {
                schema: row.try_get("schema").map_err(db_err)?,
                name: row.try_get("name").map_err(db_err)?,
            })
        })
        .collect()
}

pub async fn list_columns(pool: &PgPool, table: &TableRef) -> Result<Vec<String>> {
    let rows = sqlx::query(
        r#"
        select a.attname as name
        from pg_attribute a
        join pg_class c on c.oid = a.attrelid
        join pg_namespace n on n.oid = c.relnamespace
        where n.nspname = $1
          and c.relname = $2
          and a.attnum > 0
          and not a.attisdropped
        order by a.attnum
        "#,
    )
    .bind(&table.schema)
    .bind(&table.name)
    .fetch_all(pool)
    .await
    .map_err(db_err)?;

    rows.into_iter()
        .map(|row| row.try_get("name").map_err(db_err))
        .collect()
}

pub async fn primary_key_columns(pool: &PgPool, table: &TableRef) -> Result<Option<Vec<String>>> {
    let row = sqlx::query(
        r#"
        select array_agg(att.attname order by ord.ordinality) as columns
        from pg_constraint con
        join pg_class rel on rel.oid = con.conrelid
        join pg_namespace nsp on nsp.oid = rel.relnamespace
        join unnest(con.conkey) with ordinality as ord(attnum, ordinality) on true
        join pg_attribute att on att.attrelid = rel.oid and att.attnum = ord.attnum
        where nsp.nspname = $1
          and rel.relname = $2
          and con.contype = 'p'
        group by con.conname
        "#,
    )
    .bind(&table.schema)
    .bind(&table.name)
    .fetch_optional(pool)
    .await
    .map_err(db_err)?;

    match row {
        Some(row) => Ok(Some(row.try_get("columns").map_err(db_err)?)),
        None => Ok(None),
    }
}
