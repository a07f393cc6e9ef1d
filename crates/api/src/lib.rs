//! `mobicorp-api` — HTTP hosting layer.

pub mod app;
