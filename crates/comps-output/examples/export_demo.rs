//! Demonstration of the output side of comps: the Stock Data sheet, the
//! CSV/JSON exports and the run summary.

use comps_metrics::{
    COLUMNS, ColumnKind, CompanyRecord, ValuationInputs, ValuationRatios, columns_by_kind,
};
use comps_output::{ExportFormat, Exporter, RunSummary, STOCK_DATA_SHEET, write_stock_data};

fn record(ticker: &str, company: &str, inputs: ValuationInputs) -> CompanyRecord {
    let mut record = CompanyRecord::empty(ticker);
    record.company = company.to_string();
    record.enterprise_value = inputs.enterprise_value;
    record.ttm_revenue = inputs.ttm_revenue;
    record.ttm_revenue_growth = inputs.ttm_revenue_growth;
    record.revenue_growth_current_year = inputs.growth_estimate_current_year;
    record.gross_profit = inputs.gross_profit;
    record.ebitda_margin = inputs.ebitda_margin;
    record.ratios = ValuationRatios::derive(&inputs).into();
    record
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== comps Output Demo ===\n");

    // 1. Column layout
    println!("1. Columns ({} total)\n", COLUMNS.len());
    for column in columns_by_kind(ColumnKind::Ratio) {
        println!("  {:<14} {}", column.name, column.description);
    }

    let records = vec![
        record(
            "DDOG",
            "Datadog, Inc.",
            ValuationInputs {
                enterprise_value: 40.0e9,
                ttm_revenue: 2.5e9,
                ttm_revenue_growth: 0.26,
                growth_estimate_current_year: 0.22,
                gross_profit: 2.0e9,
                ebitda_margin: 0.05,
            },
        ),
        // No estimates: the forward ratios stay blank.
        record(
            "SNOW",
            "Snowflake Inc.",
            ValuationInputs {
                enterprise_value: 55.0e9,
                ttm_revenue: 3.4e9,
                ..ValuationInputs::default()
            },
        ),
    ];

    // 2. Exports
    println!("\n2. CSV Format:\n");
    println!("{}", records.export_to_string(ExportFormat::Csv)?);

    println!("Pretty JSON Format:\n");
    println!("{}\n", records[1].export_to_string(ExportFormat::PrettyJson)?);

    // 3. Workbook
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("Book1.xlsx");
    write_stock_data(&path, &records)?;
    println!("3. Wrote sheet '{STOCK_DATA_SHEET}' to {}\n", path.display());

    // 4. Summary
    let mut summary = RunSummary::new();
    summary.record_written();
    summary.record_written();
    summary.record_skipped("ZZZZ", "Missing data for ZZZZ: no data found");
    println!("4. Summary: {summary}");

    Ok(())
}
