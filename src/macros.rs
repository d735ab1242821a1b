// src/macros.rs

/// `String` shorthand: `s!()` is empty, `s!(x)` is `String::from(x)`.
#[macro_export]
macro_rules! s {
    () => {
        ::std::string::String::new()
    };
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

/// Concatenate string slices into one owned `String`, left to right.
/// Used for URLs and file names where `format!` would hide the pieces.
#[macro_export]
macro_rules! join {
    ($first:expr $(, $rest:expr)+ $(,)?) => {{
        let mut s = ::std::string::String::from($first);
        $(
            s.push_str($rest);
        )+
        s
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn shorthands() {
        let season = s!("2025-26");
        assert_eq!(join!("season-", &season, "/", "rounds"), "season-2025-26/rounds");
        assert!(s!().is_empty());
    }
}
