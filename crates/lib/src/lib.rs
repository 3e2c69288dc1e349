pub mod cli;
mod input;

pub use self::input::{Input, Lines};

pub mod prelude {
    //! Helper prelude with useful imports.
    pub use crate::input::Input;
    pub use anyhow::{anyhow, bail, Context, Result};
}

/// Build the `main` function of a puzzle binary.
///
/// The first argument is the name of the default input file, resolved
/// relative to the `inputs/` directory of the calling crate. The second is the
/// solve function, which must have the signature
/// `fn(&Input) -> Result<(A, B)>`.
///
/// ```ignore
/// lib::entry!("d06.txt", y2022::d06::solve);
/// ```
#[macro_export]
macro_rules! entry {
    ($input:literal, $solve:path) => {
        fn main() -> $crate::prelude::Result<()> {
            let default_input = concat!(env!("CARGO_MANIFEST_DIR"), "/inputs/", $input);
            $crate::cli::entry(default_input, $solve)
        }
    };
}

/// Evaluate the given block and return its value together with how long it
/// took.
#[macro_export]
macro_rules! timeit {
    ($($tt:tt)*) => {{
        let start = std::time::Instant::now();
        let out = { $($tt)* };
        let d = std::time::Instant::now().duration_since(start);
        (out, d)
    }}
}
