//! Tests for the WeCom clients.
