//! Core business logic for Duka.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `access` - Roles and what each role may do
//! - `catalog` - Product-side rules (unit profit, low-stock detection)
//! - `ledger` - Transaction kinds, stock mutation, total/profit derivation
//! - `period` - Day/week/month/year window arithmetic
//! - `reports` - Period aggregation and growth calculations

pub mod access;
pub mod catalog;
pub mod ledger;
pub mod period;
pub mod reports;
