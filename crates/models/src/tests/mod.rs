/// Schema round-trips against a live Postgres; skipped when none is reachable.
pub mod schema_tests;
