mod api;
mod common;
mod scoped_queries;
mod stats;
