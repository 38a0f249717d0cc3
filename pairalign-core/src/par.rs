/// Maps the fallible `$f` over `$slice`, on the rayon pool with the
/// `parallel` feature and sequentially without it. Collects into
/// `Result<Vec<_>, _>`; any error aborts the whole map.
macro_rules! par_try_map {
    ($slice:expr, $f:expr) => {{
        #[cfg(feature = "parallel")]
        {
            use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
            $slice.par_iter().map($f).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            $slice.iter().map($f).collect()
        }
    }};
}
