//! Louaj web front end.
//!
//! A server-rendered site for booking seats on louaj shared taxis. Stations,
//! vehicle queues, bookings and payments belong to the central server; this
//! crate walks passengers through the booking wizard, signs passengers and
//! station partners in, and shows bookings and partner dashboards.

pub mod central;
pub mod config;
pub mod domain;
pub mod session;
pub mod web;
pub mod wizard;
