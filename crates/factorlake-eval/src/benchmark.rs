//! Built-in benchmark return table.

use factorlake_traits::Year;

/// Annual benchmark returns in percent, keyed by the formation year of the
/// period they cover (September to September).
pub const BENCHMARK_RETURNS_PCT: &[(Year, f64)] = &[
    (2002, 34.62),
    (2003, 17.48),
    (2004, 16.56),
    (2005, 8.65),
    (2006, 11.01),
    (2007, -15.63),
    (2008, -11.08),
    (2009, 11.89),
    (2010, -4.73),
    (2011, 30.01),
    (2012, 28.22),
    (2013, 2.6),
    (2014, -0.09),
    (2015, 13.71),
    (2016, 19.11),
    (2017, 13.8),
    (2018, -10.21),
    (2019, -1.03),
    (2020, 46.21),
    (2021, -24.48),
    (2022, 7.23),
];

/// Benchmark return for the period formed in `year`, in percent; 0 outside the table.
pub fn benchmark_return_pct(year: Year) -> f64 {
    BENCHMARK_RETURNS_PCT
        .iter()
        .find(|(y, _)| *y == year)
        .map_or(0.0, |(_, pct)| *pct)
}

/// Benchmark return for the period formed in `year`, as a fraction.
pub fn benchmark_return(year: Year) -> f64 {
    benchmark_return_pct(year) / 100.0
}
