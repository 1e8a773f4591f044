// src/lib.rs — Library root for retail-chat

pub mod cli;
pub mod core;
pub mod infra;
pub mod provider;
pub mod service;
pub mod web;
