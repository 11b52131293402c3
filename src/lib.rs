//! CFT: Carbon Footprint Toolkit
//!
//! A CLI for managing emission-factor catalogs, reporting modules, client
//! accounts, and the admin-reviewed submission workflow that turns activity
//! data into verified carbon footprints. Documents live as plain YAML files
//! under a project directory.

pub mod cli;
pub mod core;
pub mod entities;
pub mod store;
