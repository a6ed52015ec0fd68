use starscan_core::{NO_ORPHANS_SENTINEL, RelationshipCandidate, TableRef};

/// Quote a catalog name so it can only ever act as an identifier.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn quote_table(table: &TableRef) -> String {
    format!("{}.{}", quote_ident(&table.schema), quote_ident(&table.name))
}

/// A single executable orphan-statistics statement for one candidate.
///
/// Building the statement touches no database: it is a pure transform from
/// the candidate to SQL text. The statement left-joins the fact table to the
/// dimension, groups per (dimension key, fact key) value pair, and aggregates
/// the groups into one row of orphan statistics. The run time comes from the
/// database clock so every result reflects the moment it was actually
/// measured.
#[derive(Debug, Clone)]
pub struct ScanStatement {
    candidate: RelationshipCandidate,
    sql: String,
}

impl ScanStatement {
    pub fn build(candidate: &RelationshipCandidate) -> Self {
        let fact = quote_table(&candidate.fact);
        let dimension = quote_table(&candidate.dimension);
        let fk = quote_ident(&candidate.foreign_key);
        let pk = quote_ident(&candidate.primary_key);

        // `fact_key < 0` assumes a numeric key; a text-typed candidate fails
        // to execute and is reported as a scan failure for that candidate.
        let sql = format!(
            r#"with grouped as (
  select
    d.{pk} as dim_key,
    f.{fk} as fact_key,
    count(*) as group_rows
  from {fact} f
  left join {dimension} d on f.{fk} = d.{pk}
  group by d.{pk}, f.{fk}
)
select
  coalesce(sum(group_rows), 0)::bigint as fact_rows,
  coalesce(sum(group_rows) filter (where dim_key is null), 0)::bigint as orphans,
  (count(*) filter (where dim_key is null))::bigint as orphaned_values,
  coalesce(max(coalesce(fact_key::text, 'Null')) filter (where dim_key is null), '{no_orphans}') as max_orphaned_value,
  coalesce(sum(group_rows) filter (where fact_key < 0), 0)::bigint as special_rows,
  now() as run_time
from grouped"#,
            no_orphans = NO_ORPHANS_SENTINEL,
        );

        Self {
            candidate: candidate.clone(),
            sql,
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn candidate(&self) -> &RelationshipCandidate {
        &self.candidate
    }
}
