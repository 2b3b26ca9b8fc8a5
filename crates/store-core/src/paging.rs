//! Paging primitives shared by every paged query.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::DomainError;

pub const DEFAULT_PAGE: u64 = 0;
pub const DEFAULT_LINES_PER_PAGE: u64 = 24;
pub const DEFAULT_DIRECTION: &str = "ASC";
pub const DEFAULT_ORDER_BY: &str = "name";

/// Largest offset or page size a SQL `LIMIT`/`OFFSET` accepts.
const MAX_ROWS: u64 = i64::MAX as u64;

/// Sort direction of a paged query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl FromStr for Direction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ASC" | "ASCENDING" => Ok(Direction::Asc),
            "DESC" | "DESCENDING" => Ok(Direction::Desc),
            _ => Err(DomainError::Validation(format!(
                "invalid direction '{s}', expected ASC or DESC"
            ))),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Asc => write!(f, "ASC"),
            Direction::Desc => write!(f, "DESC"),
        }
    }
}

/// A validated request for one page of results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub lines_per_page: u64,
    pub direction: Direction,
    pub order_by: String,
}

impl PageRequest {
    /// Build a page request from raw caller input.
    ///
    /// `order_by` must be one of `sortable`; the direction is parsed
    /// case-insensitively, `lines_per_page` must be at least one and the
    /// resulting offset must fit a SQL `OFFSET`.
    pub fn parse(
        page: u64,
        lines_per_page: u64,
        direction: &str,
        order_by: &str,
        sortable: &[&str],
    ) -> Result<Self, DomainError> {
        if lines_per_page == 0 {
            return Err(DomainError::Validation(
                "linesPerPage must be at least 1".to_string(),
            ));
        }
        let in_range = |n: u64| n <= MAX_ROWS;
        if !in_range(lines_per_page) || !page.checked_mul(lines_per_page).is_some_and(in_range) {
            return Err(DomainError::Validation(format!(
                "page {page} is out of range for linesPerPage {lines_per_page}"
            )));
        }
        if !sortable.contains(&order_by) {
            return Err(DomainError::Validation(format!(
                "cannot order by '{order_by}', expected one of: {}",
                sortable.join(", ")
            )));
        }

        Ok(Self {
            page,
            lines_per_page,
            direction: direction.parse()?,
            order_by: order_by.to_string(),
        })
    }

    /// Number of rows to skip before this page starts.
    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.lines_per_page)
    }
}

/// One page of a larger ordered result set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub number: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
    pub number_of_elements: u64,
    pub first: bool,
    pub last: bool,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        let size = request.lines_per_page;
        let total_pages = total_elements.div_ceil(size);

        Self {
            number_of_elements: content.len() as u64,
            content,
            number: request.page,
            size,
            total_elements,
            total_pages,
            first: request.page == 0,
            last: request.page.saturating_add(1) >= total_pages,
        }
    }

    /// Convert the page content while keeping the metadata.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            number_of_elements: self.number_of_elements,
            first: self.first,
            last: self.last,
        }
    }
}
