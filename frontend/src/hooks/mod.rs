pub mod use_blocked_dates;
