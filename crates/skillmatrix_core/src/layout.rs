//! Grid layout engine.
//!
//! Computes every coordinate of the two output sheets from the roster and the
//! taxonomy without touching a workbook. All rows and columns here are 1-based
//! Excel coordinates (row 1 is the first row, column 1 is `A`).

use skillmatrix_io_xlsx::derive_internal_link_target;
use tracing::debug;

use crate::conf::{
    C_SHEET_NAME_MATRIX, N_COL_MATRIX_NAME, N_ROW_MATRIX_CATEGORY, N_ROWS_HEADER_MATRIX,
    N_ROWS_HEADER_ROSTER,
};
use crate::spec::{SpecPerson, SpecTaxonomy};

////////////////////////////////////////////////////////////////////////////////
// #region LayoutModels

/// One skill column on the matrix sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSkillColumn {
    /// Skill label.
    pub name: String,
    /// Column.
    pub col: usize,
}

/// Column block of one category on the matrix sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecCategoryBand {
    /// Category label.
    pub name: String,
    /// First column (inclusive).
    pub col_start: usize,
    /// Column after the last skill column (exclusive).
    pub col_end_exclusive: usize,
    /// Skill columns, ascending.
    pub skills: Vec<SpecSkillColumn>,
}

impl SpecCategoryBand {
    /// Number of skill columns.
    pub fn width(&self) -> usize {
        self.col_end_exclusive - self.col_start
    }
}

/// Merged category label cell in row 1. Columns inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecMergeRegion {
    /// Row of the label band.
    pub row: usize,
    /// First merged column.
    pub col_start: usize,
    /// Last merged column.
    pub col_end: usize,
    /// Category label.
    pub text: String,
}

/// Rectangular block of proficiency input cells. Bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecValidationRegion {
    /// First person row.
    pub row_start: usize,
    /// First skill column.
    pub col_start: usize,
    /// Last person row.
    pub row_end: usize,
    /// Last skill column.
    pub col_end: usize,
}

impl SpecValidationRegion {
    /// Number of covered cells.
    pub fn n_cells(&self) -> usize {
        (self.row_end - self.row_start + 1) * (self.col_end - self.col_start + 1)
    }
}

/// Coordinates of both output sheets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecGridLayout {
    bands: Vec<SpecCategoryBand>,
    n_persons: usize,
    col_end_exclusive: usize,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region LayoutPlanning

/// Plan the layout for `persons` against `taxonomy`.
///
/// Category bands are laid out left to right in taxonomy order, starting right
/// after the name column. A category without skills gets a zero-width band.
pub fn plan_grid_layout(persons: &[SpecPerson], taxonomy: &SpecTaxonomy) -> SpecGridLayout {
    let mut n_col_cursor = N_COL_MATRIX_NAME + 1;
    let mut l_bands = Vec::with_capacity(taxonomy.len());

    for category in &taxonomy.categories {
        let n_col_start = n_col_cursor;
        let l_skill_cols = category
            .skills
            .iter()
            .enumerate()
            .map(|(n_idx_skill, c_skill)| SpecSkillColumn {
                name: c_skill.clone(),
                col: n_col_start + n_idx_skill,
            })
            .collect::<Vec<_>>();
        n_col_cursor += category.skills.len();

        l_bands.push(SpecCategoryBand {
            name: category.name.clone(),
            col_start: n_col_start,
            col_end_exclusive: n_col_cursor,
            skills: l_skill_cols,
        });
    }

    debug!(
        bands = l_bands.len(),
        persons = persons.len(),
        col_end_exclusive = n_col_cursor,
        "planned grid layout"
    );

    SpecGridLayout {
        bands: l_bands,
        n_persons: persons.len(),
        col_end_exclusive: n_col_cursor,
    }
}

impl SpecGridLayout {
    /// Category bands in taxonomy order.
    pub fn categories(&self) -> &[SpecCategoryBand] {
        &self.bands
    }

    fn band(&self, category: &str) -> Option<&SpecCategoryBand> {
        self.bands.iter().find(|band| band.name == category)
    }

    /// Half-open `(start, end)` column range of `category`.
    pub fn category_column_range(&self, category: &str) -> Option<(usize, usize)> {
        self.band(category)
            .map(|band| (band.col_start, band.col_end_exclusive))
    }

    /// Column of the `skill_index`-th skill of `category`.
    pub fn skill_column(&self, category: &str, skill_index: usize) -> Option<usize> {
        let band = self.band(category)?;
        (skill_index < band.width()).then_some(band.col_start + skill_index)
    }

    /// Matrix row of person `person_index` (rows 1-2 hold the header bands).
    pub fn person_matrix_row(&self, person_index: usize) -> usize {
        person_index + N_ROWS_HEADER_MATRIX + 1
    }

    /// Roster row of person `person_index` (row 1 holds the column header).
    pub fn person_roster_row(&self, person_index: usize) -> usize {
        person_index + N_ROWS_HEADER_ROSTER + 1
    }

    /// Merged label cell for `category`; `None` when it has no skills.
    pub fn merge_region(&self, category: &str) -> Option<SpecMergeRegion> {
        self.band(category).and_then(derive_merge_region)
    }

    /// Merge regions of every non-empty category, left to right.
    pub fn merge_regions(&self) -> Vec<SpecMergeRegion> {
        self.bands.iter().filter_map(derive_merge_region).collect()
    }

    /// Cell the roster link of person `person_index` points at.
    pub fn hyperlink_anchor(&self, person_index: usize) -> String {
        derive_internal_link_target(
            C_SHEET_NAME_MATRIX,
            self.person_matrix_row(person_index) - 1,
            N_COL_MATRIX_NAME - 1,
        )
    }

    /// First column after the last skill column.
    pub fn col_end_exclusive(&self) -> usize {
        self.col_end_exclusive
    }

    /// Total skill columns (matrix columns minus the name column).
    pub fn n_skill_columns(&self) -> usize {
        self.col_end_exclusive - (N_COL_MATRIX_NAME + 1)
    }

    /// Number of person rows.
    pub fn n_persons(&self) -> usize {
        self.n_persons
    }

    /// Every `(column, skill label)` in column order.
    pub fn skill_labels(&self) -> Vec<(usize, &str)> {
        self.bands
            .iter()
            .flat_map(|band| band.skills.iter())
            .map(|skill| (skill.col, skill.name.as_str()))
            .collect()
    }

    /// Block of proficiency cells; `None` when there are no people or no skills.
    pub fn validation_region(&self) -> Option<SpecValidationRegion> {
        if self.n_persons == 0 || self.n_skill_columns() == 0 {
            return None;
        }
        Some(SpecValidationRegion {
            row_start: self.person_matrix_row(0),
            col_start: N_COL_MATRIX_NAME + 1,
            row_end: self.person_matrix_row(self.n_persons - 1),
            col_end: self.col_end_exclusive - 1,
        })
    }
}

fn derive_merge_region(band: &SpecCategoryBand) -> Option<SpecMergeRegion> {
    if band.width() == 0 {
        return None;
    }
    Some(SpecMergeRegion {
        row: N_ROW_MATRIX_CATEGORY,
        col_start: band.col_start,
        col_end: band.col_end_exclusive - 1,
        text: band.name.clone(),
    })
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::SpecCategory;

    fn create_persons(n: usize) -> Vec<SpecPerson> {
        (0..n)
            .map(|n_idx| SpecPerson::with_name(format!("Person {n_idx}")))
            .collect()
    }

    fn create_scenario_taxonomy() -> SpecTaxonomy {
        SpecTaxonomy::from_pairs([
            ("Frontend", "Vue"),
            ("Frontend", "React"),
            ("Backend", "Go"),
        ])
    }

    #[test]
    fn layout_two_people_two_categories() {
        let layout = plan_grid_layout(&create_persons(2), &create_scenario_taxonomy());

        assert_eq!(layout.category_column_range("Frontend"), Some((2, 4)));
        assert_eq!(layout.category_column_range("Backend"), Some((4, 5)));
        assert_eq!(
            layout.skill_labels(),
            vec![(2, "React"), (3, "Vue"), (4, "Go")]
        );
        assert_eq!(
            layout.merge_regions(),
            vec![
                SpecMergeRegion {
                    row: 1,
                    col_start: 2,
                    col_end: 3,
                    text: "Frontend".to_string(),
                },
                SpecMergeRegion {
                    row: 1,
                    col_start: 4,
                    col_end: 4,
                    text: "Backend".to_string(),
                },
            ]
        );
        assert_eq!(layout.person_matrix_row(0), 3);
        assert_eq!(layout.person_matrix_row(1), 4);
        assert_eq!(layout.person_roster_row(0), 2);
        assert_eq!(layout.person_roster_row(1), 3);
        assert_eq!(
            layout.validation_region(),
            Some(SpecValidationRegion {
                row_start: 3,
                col_start: 2,
                row_end: 4,
                col_end: 4,
            })
        );
    }

    #[test]
    fn layout_empty_taxonomy_has_no_skill_columns() {
        let layout = plan_grid_layout(&create_persons(1), &SpecTaxonomy::default());

        assert_eq!(layout.n_skill_columns(), 0);
        assert_eq!(layout.col_end_exclusive(), 2);
        assert!(layout.merge_regions().is_empty());
        assert_eq!(layout.validation_region(), None);
        assert_eq!(layout.person_matrix_row(0), 3);
    }

    #[test]
    fn layout_empty_roster_has_no_rows() {
        let layout = plan_grid_layout(&[], &create_scenario_taxonomy());

        assert_eq!(layout.n_persons(), 0);
        assert_eq!(layout.n_skill_columns(), 3);
        assert_eq!(layout.validation_region(), None);
    }

    #[test]
    fn layout_zero_skill_category_is_zero_width_without_merge() {
        let taxonomy = SpecTaxonomy {
            categories: vec![
                SpecCategory {
                    name: "Empty".to_string(),
                    skills: vec![],
                },
                SpecCategory {
                    name: "Data".to_string(),
                    skills: vec!["SQL".to_string()],
                },
            ],
        };
        let layout = plan_grid_layout(&create_persons(1), &taxonomy);

        assert_eq!(layout.category_column_range("Empty"), Some((2, 2)));
        assert_eq!(layout.merge_region("Empty"), None);
        assert_eq!(layout.skill_column("Empty", 0), None);
        assert_eq!(layout.category_column_range("Data"), Some((2, 3)));
        assert_eq!(layout.skill_column("Data", 0), Some(2));
    }

    #[test]
    fn layout_absent_category_is_absent() {
        let layout = plan_grid_layout(&create_persons(1), &create_scenario_taxonomy());

        assert_eq!(layout.category_column_range("Data"), None);
        assert_eq!(layout.merge_region("Data"), None);
        assert_eq!(layout.skill_column("Data", 0), None);
    }

    #[test]
    fn layout_duplicate_pair_gets_two_columns() {
        let taxonomy = SpecTaxonomy::from_pairs([("Cloud", "AWS"), ("Cloud", "AWS")]);
        let layout = plan_grid_layout(&create_persons(1), &taxonomy);

        assert_eq!(layout.skill_labels(), vec![(2, "AWS"), (3, "AWS")]);
        assert_eq!(layout.category_column_range("Cloud"), Some((2, 4)));
    }

    #[test]
    fn layout_bands_are_contiguous_and_cover_every_skill() {
        let taxonomy = SpecTaxonomy::from_pairs([
            ("A", "a1"),
            ("B", "b1"),
            ("B", "b2"),
            ("B", "b3"),
            ("C", "c1"),
            ("A", "a2"),
        ]);
        let layout = plan_grid_layout(&create_persons(3), &taxonomy);

        let mut n_col_expected = 2;
        for (band, category) in layout.categories().iter().zip(&taxonomy.categories) {
            assert_eq!(band.col_start, n_col_expected);
            assert_eq!(band.width(), category.skills.len());
            for (n_idx_skill, _) in category.skills.iter().enumerate() {
                assert_eq!(
                    layout.skill_column(&category.name, n_idx_skill),
                    Some(band.col_start + n_idx_skill)
                );
            }
            n_col_expected = band.col_end_exclusive;
        }
        assert_eq!(layout.col_end_exclusive(), n_col_expected);
        assert_eq!(layout.n_skill_columns(), taxonomy.n_skills());
    }

    #[test]
    fn hyperlink_anchor_points_at_matrix_row() {
        let layout = plan_grid_layout(&create_persons(12), &create_scenario_taxonomy());

        assert_eq!(layout.hyperlink_anchor(0), "'Skill Proficiencies'!A3");
        for n_idx in 0..12 {
            assert_eq!(
                layout.hyperlink_anchor(n_idx),
                format!("'Skill Proficiencies'!A{}", layout.person_matrix_row(n_idx))
            );
        }
    }

    #[test]
    fn layout_is_deterministic() {
        let persons = create_persons(4);
        let taxonomy = create_scenario_taxonomy();
        assert_eq!(
            plan_grid_layout(&persons, &taxonomy),
            plan_grid_layout(&persons, &taxonomy)
        );
    }
}
