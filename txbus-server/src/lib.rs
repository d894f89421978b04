//! TXBus search server.
//!
//! A single-page bus search: pick a date, two Texas cities and a passenger
//! count, see what the operators offer, sort it, and jump to the operator's
//! booking page.

pub mod booking;
pub mod config;
pub mod domain;
pub mod schedule;
pub mod sort;
pub mod view;
pub mod web;
