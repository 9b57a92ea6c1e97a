// lumen-value - Thread-local print settings
// Copyright (c) 2025 Tom Waddington. MIT licensed.

use std::cell::Cell;

thread_local! {
    /// Maximum number of elements rendered per collection.
    /// None means unlimited.
    static PRINT_LENGTH: Cell<Option<usize>> = const { Cell::new(None) };
}

/// Get the current print-length setting.
pub fn get_print_length() -> Option<usize> {
    PRINT_LENGTH.with(|pl| pl.get())
}

/// Set the print-length setting. Returns the previous value.
pub fn set_print_length(len: Option<usize>) -> Option<usize> {
    PRINT_LENGTH.with(|pl| pl.replace(len))
}
