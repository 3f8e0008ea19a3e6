//! Dataset loading for factorlake.
//!
//! A dataset is one table with a row per `(ticker, year)`. This crate reads it
//! from a local CSV file or a Supabase table and normalizes it into a
//! [`factorlake_traits::Dataset`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use factorlake_data::{CsvLoader, Loader, SupabaseLoader};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Local file
//!     let dataset = CsvLoader::new("data/factors.csv").load().await?;
//!
//!     // Remote table
//!     let dataset = SupabaseLoader::from_env()?.load().await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Environment Variables
//!
//! Set `SUPABASE_URL` and `SUPABASE_KEY` in your environment or `.env` file:
//!
//! ```bash
//! SUPABASE_URL=https://your-project.supabase.co
//! SUPABASE_KEY=your_api_key_here
//! ```

mod csv;
mod error;
mod loader;
pub mod normalize;
mod supabase;

pub use csv::CsvLoader;
pub use error::DataError;
pub use loader::Loader;
pub use normalize::{NormalizeOptions, normalize_frame};
pub use supabase::{SUPABASE_KEY, SUPABASE_URL, SupabaseLoader, rows_to_frame};

/// Result type for dataset loading.
pub type Result<T> = std::result::Result<T, DataError>;
