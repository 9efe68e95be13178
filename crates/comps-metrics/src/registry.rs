//! Column Registry
//!
//! Central description of every output column, in output order. The sheet
//! writer takes its header row from here.

/// Where a column's value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    /// Identifies the company (ticker, name)
    Identifier,
    /// Market-derived values (price, market cap, EV)
    Market,
    /// Reported fundamentals (revenue, debt, margins)
    Fundamental,
    /// Analyst estimates
    Estimate,
    /// Ratios derived from the above
    Ratio,
}

/// Column metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnInfo {
    /// Header text, exactly as written to the sheet
    pub name: &'static str,
    /// Column kind
    pub kind: ColumnKind,
    /// Brief description of the value
    pub description: &'static str,
}

const fn column(name: &'static str, kind: ColumnKind, description: &'static str) -> ColumnInfo {
    ColumnInfo {
        name,
        kind,
        description,
    }
}

/// Number of output columns.
pub const COLUMN_COUNT: usize = 19;

/// All output columns in fixed order.
#[rustfmt::skip]
pub const COLUMNS: [ColumnInfo; COLUMN_COUNT] = [
    column("Ticker", ColumnKind::Identifier, "Trimmed ticker symbol"),
    column("Company", ColumnKind::Identifier, "Company long name, N/A when unknown"),
    column("Price", ColumnKind::Market, "Current share price"),
    column("Market Cap", ColumnKind::Market, "Market capitalization"),
    column("EV", ColumnKind::Market, "Enterprise value"),
    column("Debt", ColumnKind::Fundamental, "Total debt"),
    column("TTM Rev", ColumnKind::Fundamental, "Trailing twelve month revenue"),
    column("TTM Rev Gr", ColumnKind::Fundamental, "Trailing twelve month revenue growth"),
    column("Tgt Rev Gr CY", ColumnKind::Estimate, "Analyst revenue growth estimate, current year"),
    column("Tgt Rev Gr NY", ColumnKind::Estimate, "Analyst revenue growth estimate, next year"),
    column("Gross Profit", ColumnKind::Fundamental, "Most recent annual gross profit"),
    column("Gross Mgn", ColumnKind::Fundamental, "Gross margin"),
    column("EBITDA", ColumnKind::Fundamental, "Trailing EBITDA"),
    column("EBITDA Mgn", ColumnKind::Fundamental, "EBITDA margin"),
    column("EV/TTM Rev", ColumnKind::Ratio, "EV over trailing revenue"),
    column("EV/Fwd Rev", ColumnKind::Ratio, "EV over revenue grown by the current-year estimate"),
    column("EV/GP", ColumnKind::Ratio, "EV over gross profit"),
    column("EV/GP/Exp Gr", ColumnKind::Ratio, "EV/GP over the current-year growth estimate"),
    column("Rule of 40", ColumnKind::Ratio, "TTM revenue growth plus EBITDA margin"),
];

/// Header names in output order.
pub fn column_names() -> [&'static str; COLUMN_COUNT] {
    COLUMNS.map(|c| c.name)
}

/// Get columns by kind, in output order
pub fn columns_by_kind(kind: ColumnKind) -> Vec<&'static ColumnInfo> {
    COLUMNS.iter().filter(|c| c.kind == kind).collect()
}
