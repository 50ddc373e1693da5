//! Slack webhook rendering for a finished report.

use reqwest::Client;
use serde::Serialize;
use tracing::info;
use url::Url;

use super::RenderError;
use crate::models::Report;

/// Incoming-webhook message body.
#[derive(Debug, Clone, Serialize)]
pub struct SlackMessage {
    pub text: String,
}

/// Renders the report as Slack markdown.
pub fn message(report: &Report) -> SlackMessage {
    let text = format!(
        "*Summary*\n\
         \n\
         *Number of Meetings*\n\
         {count}\n\
         \n\
         *Weekly Costs*\n\
         {weekly_time}\n\
         {weekly_money}\n\
         \n\
         *Average Per Meeting*\n\
         \n\
         Time Cost: {avg_time}\n\
         Financial Cost: {avg_money}\n\
         Duration: {avg_duration}\n\
         \n\
         *Projected Yearly Costs*\n\
         {yearly_time}\n\
         {yearly_money}\n\
         \n\
         *Top 3 Meeting Times*\n\
         {top1},\n\
         {top2},\n\
         {top3}\n\
         \n\
         *{percent}* of Your Time is Spent in Meetings\n\
         \n\
         *Ideal Weekly Costs*\n\
         {ideal_weekly_time} and {ideal_weekly_money}\n\
         \n\
         *Ideal Yearly Costs*\n\
         {ideal_yearly_time} and {ideal_yearly_money}\n\
         \n\
         *Potential Savings*\n\
         {weekly_money_rec} and {weekly_time_rec} per week\n\
         {yearly_money_rec} and {yearly_time_rec} per year\n",
        count = report.meeting_count,
        weekly_time = report.weekly_cost_time_readable,
        weekly_money = report.weekly_cost_money_readable,
        avg_time = report.avg_cost_time_readable,
        avg_money = report.avg_cost_money_readable,
        avg_duration = report.avg_duration_readable,
        yearly_time = report.yearly_cost_time_readable,
        yearly_money = report.yearly_cost_money_readable,
        top1 = report.top_slot_1,
        top2 = report.top_slot_2,
        top3 = report.top_slot_3,
        percent = report.percent_time_readable,
        ideal_weekly_time = report.weekly_ideal_time_readable,
        ideal_weekly_money = report.weekly_ideal_cost_readable,
        ideal_yearly_time = report.yearly_ideal_time_readable,
        ideal_yearly_money = report.yearly_ideal_cost_readable,
        weekly_money_rec = report.weekly_money_recovered_readable,
        weekly_time_rec = report.weekly_time_recovered_readable,
        yearly_money_rec = report.yearly_money_recovered_readable,
        yearly_time_rec = report.yearly_time_recovered_readable,
    );

    SlackMessage { text }
}

/// Posts the report to an incoming webhook.
pub async fn post(client: &Client, webhook: &Url, report: &Report) -> Result<(), RenderError> {
    let body = message(report);
    let response = client.post(webhook.clone()).json(&body).send().await?;

    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(RenderError::WebhookStatus {
            status: status.as_u16(),
            message,
        });
    }

    info!(webhook = %webhook, "posted report to slack");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate;
    use crate::models::{CostModel, CostParams};

    fn empty_report() -> Report {
        let model = CostModel::from_params(&CostParams::default()).unwrap();
        calculate::build(&[], &model)
    }

    #[test]
    fn test_message_sections_present() {
        let msg = message(&empty_report());

        assert!(msg.text.starts_with("*Summary*"));
        assert!(msg.text.contains("*Number of Meetings*\n0"));
        assert!(msg.text.contains("*Top 3 Meeting Times*"));
        assert!(msg.text.contains("Calendar empty,"));
        assert!(msg.text.contains("per year"));
    }

    #[test]
    fn test_message_serializes_to_text_field() {
        let msg = message(&empty_report());
        let json = serde_json::to_value(&msg).unwrap();

        assert!(json.get("text").and_then(|v| v.as_str()).is_some());
    }
}
