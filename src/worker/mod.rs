pub mod reserve_fetcher;

pub use reserve_fetcher::ReserveFetcher;
