pub mod google_oauth;
pub mod loopback;
pub mod token_cache;
