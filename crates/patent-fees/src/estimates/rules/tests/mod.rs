mod common;
mod routes;
