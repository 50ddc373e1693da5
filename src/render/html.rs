//! HTML rendering of a finished report.

use std::fs;
use std::path::Path;

use tracing::info;

use super::RenderError;
use crate::models::Report;

/// Renders the report as a standalone HTML page.
pub fn page(report: &Report) -> String {
    let mut rows = String::new();
    row(&mut rows, "Number of Meetings", &report.meeting_count.to_string());
    row(&mut rows, "Weekly Cost: Financial", &report.weekly_cost_money_readable);
    row(&mut rows, "Weekly Cost: Time", &report.weekly_cost_time_readable);
    row(&mut rows, "Average Financial Cost Per Meeting", &report.avg_cost_money_readable);
    row(&mut rows, "Average Time Cost Per Meeting", &report.avg_cost_time_readable);
    row(&mut rows, "Average Duration Per Meeting", &report.avg_duration_readable);
    row(&mut rows, "Projected Yearly Cost: Financial", &report.yearly_cost_money_readable);
    row(&mut rows, "Projected Yearly Cost: Time", &report.yearly_cost_time_readable);
    row(&mut rows, "Top Meeting Time No. 1", &report.top_slot_1);
    row(&mut rows, "Top Meeting Time No. 2", &report.top_slot_2);
    row(&mut rows, "Top Meeting Time No. 3", &report.top_slot_3);
    row(&mut rows, "Percent Time Spent in Meetings", &report.percent_time_readable);
    row(&mut rows, "Ideal Weekly Costs: Financial", &report.weekly_ideal_cost_readable);
    row(&mut rows, "Ideal Weekly Costs: Time", &report.weekly_ideal_time_readable);
    row(&mut rows, "Ideal Yearly Costs: Financial", &report.yearly_ideal_cost_readable);
    row(&mut rows, "Ideal Yearly Costs: Time", &report.yearly_ideal_time_readable);
    row(&mut rows, "Weekly Potential Savings: Financial", &report.weekly_money_recovered_readable);
    row(&mut rows, "Weekly Potential Savings: Time", &report.weekly_time_recovered_readable);
    row(&mut rows, "Yearly Potential Savings: Financial", &report.yearly_money_recovered_readable);
    row(&mut rows, "Yearly Potential Savings: Time", &report.yearly_time_recovered_readable);

    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>Meetings Report</title>\n\
         </head>\n\
         <body>\n\
         <div class=\"report\">\n\
         <table id=\"meetingsReport\">\n\
         <caption>Meetings Report</caption>\n\
         <tr><th>Description</th><th>Value</th></tr>\n\
         {rows}\
         </table>\n\
         </div>\n\
         </body>\n\
         </html>\n"
    )
}

fn row(out: &mut String, label: &str, value: &str) {
    out.push_str(&format!(
        "<tr><td>{label}</td><td>{}</td></tr>\n",
        escape(value)
    ));
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Writes the HTML page to `path`.
pub fn write_page(report: &Report, path: &Path) -> Result<(), RenderError> {
    fs::write(path, page(report))?;
    info!(path = %path.display(), "wrote html report");
    Ok(())
}
