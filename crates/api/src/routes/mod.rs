//! Route handlers

pub mod rooms;
