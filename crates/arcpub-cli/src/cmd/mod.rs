pub mod materialize;
pub mod repo;
pub mod run;
