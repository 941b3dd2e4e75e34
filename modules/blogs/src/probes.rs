//! Query probes: filtered article queries whose emitted SQL is inspected.
//!
//! Every probe loads articles together with their blog (a left join) and
//! filters on the search term. The SQL the ORM produced is read back from the
//! current capture context and classified by the predicate in its `WHERE`
//! clause.

use std::fmt;

use sea_orm::{ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter};
use sql_capture::CaptureContext;
use tracing::{debug, info_span, Instrument};

use crate::domain::error::DomainError;
use crate::domain::models::ArticleWithBlog;
use crate::infra::storage::db::db_err;
use crate::infra::storage::entity::{article, blog};

/// Kind of predicate found in a statement's `WHERE` clause.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PredicateFamily {
    /// Pattern match (`LIKE`).
    Like,
    /// Plain comparison (`=`) and no `LIKE`.
    Equality,
    /// No `WHERE` clause, or neither of the above.
    Other,
}

impl PredicateFamily {
    /// Classify the last `WHERE` clause in `sql`.
    #[must_use]
    pub fn classify(sql: &str) -> Self {
        let upper = sql.to_ascii_uppercase();
        let Some(start) = upper.rfind("WHERE") else {
            return Self::Other;
        };
        let clause = &upper[start..];

        if clause.contains(" LIKE ") {
            Self::Like
        } else if clause.contains(" = ") {
            Self::Equality
        } else {
            Self::Other
        }
    }
}

impl fmt::Display for PredicateFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Like => "LIKE",
            Self::Equality => "equality",
            Self::Other => "other",
        })
    }
}

/// Predicate family a probe is expected to translate into.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Expectation {
    Like,
    Equality,
}

impl Expectation {
    #[must_use]
    pub fn is_met_by(self, family: PredicateFamily) -> bool {
        matches!(
            (self, family),
            (Self::Like, PredicateFamily::Like) | (Self::Equality, PredicateFamily::Equality)
        )
    }
}

/// One example query.
#[derive(Clone, Copy)]
pub struct Probe {
    pub name: &'static str,
    pub description: &'static str,
    pub expectation: Expectation,
    filter: fn(&str) -> Condition,
}

impl Probe {
    #[must_use]
    pub fn condition(&self, search: &str) -> Condition {
        (self.filter)(search)
    }
}

impl fmt::Debug for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Probe")
            .field("name", &self.name)
            .field("expectation", &self.expectation)
            .finish_non_exhaustive()
    }
}

/// The four probes: substring matches on the article's own columns, on the
/// joined blog's name, an equality on the blog's name, and all substring
/// matches combined.
#[must_use]
pub fn default_probes() -> Vec<Probe> {
    vec![
        Probe {
            name: "title_or_subtitle_contains",
            description: "article title or subtitle contains the search term",
            expectation: Expectation::Like,
            filter: |s| {
                Condition::any()
                    .add(article::Column::Title.contains(s))
                    .add(article::Column::Subtitle.contains(s))
            },
        },
        Probe {
            name: "blog_name_contains",
            description: "joined blog name contains the search term",
            expectation: Expectation::Like,
            filter: |s| Condition::all().add(blog::Column::Name.contains(s)),
        },
        Probe {
            name: "blog_name_equals",
            description: "joined blog name equals the search term",
            expectation: Expectation::Equality,
            filter: |s| Condition::all().add(blog::Column::Name.eq(s)),
        },
        Probe {
            name: "any_contains",
            description: "title, subtitle or joined blog name contains the search term",
            expectation: Expectation::Like,
            filter: |s| {
                Condition::any()
                    .add(article::Column::Title.contains(s))
                    .add(article::Column::Subtitle.contains(s))
                    .add(blog::Column::Name.contains(s))
            },
        },
    ]
}

/// Result of running one probe.
#[derive(Clone, Debug)]
pub struct ProbeOutcome {
    pub name: &'static str,
    pub expectation: Expectation,
    pub observed: PredicateFamily,
    /// Everything captured while the query ran.
    pub sql: String,
    pub rows: Vec<ArticleWithBlog>,
}

impl ProbeOutcome {
    #[must_use]
    pub fn satisfied(&self) -> bool {
        self.expectation.is_met_by(self.observed)
    }

    /// One report line, plus the SQL when the expectation was missed.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.satisfied() {
            return "Sql ok".to_owned();
        }
        match self.expectation {
            Expectation::Like => format!("Sql did NOT contain LIKE: \n{}", self.sql),
            Expectation::Equality => format!("Sql did NOT use equality: \n{}", self.sql),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ProbeReport {
    pub outcomes: Vec<ProbeOutcome>,
}

impl ProbeReport {
    #[must_use]
    pub fn all_satisfied(&self) -> bool {
        self.outcomes.iter().all(ProbeOutcome::satisfied)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ProbeOutcome> {
        self.outcomes.iter().find(|o| o.name == name)
    }
}

/// Run `probe` and inspect the SQL it produced.
///
/// Resets the current capture context first, so the outcome only holds the
/// statements of this query.
///
/// # Errors
///
/// [`DomainError::Database`] when the query fails.
pub async fn run_probe<C>(db: &C, probe: &Probe, search: &str) -> Result<ProbeOutcome, DomainError>
where
    C: ConnectionTrait,
{
    let capture = CaptureContext::current();
    capture.reset();

    let rows = article::Entity::find()
        .find_also_related(blog::Entity)
        .filter(probe.condition(search))
        .all(db)
        .instrument(info_span!(
            "probe",
            name = probe.name,
            description = probe.description
        ))
        .await
        .map_err(db_err)?;

    let sql = capture.sql();
    let observed = PredicateFamily::classify(&sql);
    debug!(
        probe = probe.name,
        description = probe.description,
        rows = rows.len(),
        %observed,
        "probe executed"
    );

    Ok(ProbeOutcome {
        name: probe.name,
        expectation: probe.expectation,
        observed,
        sql,
        rows: rows.into_iter().map(Into::into).collect(),
    })
}

/// Run `probes` one after another.
///
/// # Errors
///
/// Stops at the first failing query.
pub async fn run_probes<C>(
    db: &C,
    probes: &[Probe],
    search: &str,
) -> Result<ProbeReport, DomainError>
where
    C: ConnectionTrait,
{
    let mut outcomes = Vec::with_capacity(probes.len());
    for probe in probes {
        outcomes.push(run_probe(db, probe, search).await?);
    }
    Ok(ProbeReport { outcomes })
}

#[cfg(test)]
mod tests {
    use sea_orm::{DbBackend, QueryTrait};

    use super::*;

    fn sqlite_sql(probe: &Probe) -> String {
        article::Entity::find()
            .find_also_related(blog::Entity)
            .filter(probe.condition("Name"))
            .build(DbBackend::Sqlite)
            .to_string()
    }

    #[test]
    fn classify_reads_where_clause_only() {
        let sql = r#"SELECT * FROM "articles" LEFT JOIN "blogs" ON "articles"."blogid" = "blogs"."id" WHERE "blogs"."name" LIKE '%Name%'"#;
        assert_eq!(PredicateFamily::classify(sql), PredicateFamily::Like);

        let sql = r#"SELECT * FROM "articles" LEFT JOIN "blogs" ON "articles"."blogid" = "blogs"."id""#;
        assert_eq!(PredicateFamily::classify(sql), PredicateFamily::Other);

        let sql = r#"SELECT * FROM "blogs" WHERE "blogs"."name" = ?"#;
        assert_eq!(PredicateFamily::classify(sql), PredicateFamily::Equality);
    }

    #[test]
    fn default_probes_keep_their_order() {
        let names: Vec<_> = default_probes().iter().map(|p| p.name).collect();
        assert_eq!(
            names,
            [
                "title_or_subtitle_contains",
                "blog_name_contains",
                "blog_name_equals",
                "any_contains"
            ]
        );
    }

    #[test]
    fn built_sql_matches_each_expectation() {
        for probe in default_probes() {
            let sql = sqlite_sql(&probe);
            assert!(
                probe.expectation.is_met_by(PredicateFamily::classify(&sql)),
                "{}: {sql}",
                probe.name
            );
        }
    }

    #[test]
    fn summary_shows_sql_on_miss() {
        let outcome = ProbeOutcome {
            name: "blog_name_contains",
            expectation: Expectation::Like,
            observed: PredicateFamily::Equality,
            sql: "SELECT 1".to_owned(),
            rows: Vec::new(),
        };
        assert!(!outcome.satisfied());
        assert_eq!(outcome.summary(), "Sql did NOT contain LIKE: \nSELECT 1");

        let ok = ProbeOutcome {
            observed: PredicateFamily::Like,
            ..outcome
        };
        assert_eq!(ok.summary(), "Sql ok");
    }
}
