//! Stateless helper utilities used by the reader and writer kernels.

use crate::conf::{N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, TUP_EXCEL_ILLEGAL};

////////////////////////////////////////////////////////////////////////////////
// #region CellValueText

/// Render a float the way a spreadsheet shows it as plain text.
pub fn format_number_text(x: f64) -> String {
    if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e15 {
        return format!("{}", x as i64);
    }
    x.to_string()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CellAddress

/// Convert a zero-based column index into Excel column letters (`0` -> `A`).
pub fn derive_column_letters(col_idx: usize) -> String {
    let mut v_chars = Vec::new();
    let mut n_rem = col_idx + 1;
    while n_rem > 0 {
        let n_digit = (n_rem - 1) % 26;
        v_chars.push((b'A' + n_digit as u8) as char);
        n_rem = (n_rem - 1) / 26;
    }
    v_chars.iter().rev().collect()
}

/// Convert zero-based `(row, col)` into an A1-style address.
pub fn derive_cell_address(row_idx: usize, col_idx: usize) -> String {
    format!("{}{}", derive_column_letters(col_idx), row_idx + 1)
}

/// Build a quoted cross-sheet reference such as `'My Sheet'!A3`.
///
/// Single quotes in the sheet name are doubled.
pub fn derive_internal_link_target(sheet_name: &str, row_idx: usize, col_idx: usize) -> String {
    format!(
        "'{}'!{}",
        sheet_name.replace('\'', "''"),
        derive_cell_address(row_idx, col_idx)
    )
}

/// Validate that a zero-based column index is inside the Excel grid.
pub fn validate_col_idx(col_idx: usize) -> Result<(), String> {
    if col_idx >= N_NCOLS_EXCEL_MAX {
        return Err(format!(
            "Column index {col_idx} exceeds Excel limit of {N_NCOLS_EXCEL_MAX} columns."
        ));
    }
    Ok(())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetNormalization

/// Replace invalid chars and trim to valid Excel sheet name.
pub fn sanitize_sheet_name(name: &str, replace_to: &str) -> String {
    let mut c_name = name.to_string();
    for c_illegal in TUP_EXCEL_ILLEGAL {
        c_name = c_name.replace(c_illegal, replace_to);
    }
    c_name = c_name.trim().to_string();
    if c_name.is_empty() {
        c_name = "Sheet".to_string();
    }

    c_name.chars().take(N_LEN_EXCEL_SHEET_NAME_MAX).collect()
}

/// Create suffixed sheet name (`base__2`, `base__3`, ...), respecting length cap.
pub fn create_sheet_identifier(base_name: &str, part_idx: usize) -> String {
    let c_sheet_name_suffix = format!("__{part_idx}");
    let n_len_base_name_max = N_LEN_EXCEL_SHEET_NAME_MAX.saturating_sub(c_sheet_name_suffix.len());

    let c_sheet_name_base: String = base_name
        .chars()
        .take(usize::max(1, n_len_base_name_max))
        .collect();

    format!("{c_sheet_name_base}{c_sheet_name_suffix}")
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
