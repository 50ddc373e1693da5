//! Console printout of meetings and the report summary.

use crate::models::{CostModel, Meeting, Report};
use crate::timefmt;

/// One meeting, formatted the way the CLI prints it while ingesting.
pub fn meeting_block(meeting: &Meeting, model: &CostModel) -> String {
    format!(
        "\nMeeting {num}: {summary}\n\
         ======================================================================\n\
         Start: {start}\n\
         End: {end}\n\
         Duration: {duration}\n\
         Number of Attendees: {attendees}\n\
         Cost: {cost}\n\
         Cost in Time: {cost_time}\n",
        num = meeting.sequence_number,
        summary = meeting.summary,
        start = meeting.start,
        end = meeting.end,
        duration = timefmt::format_seconds(meeting.duration_seconds()),
        attendees = meeting.attendee_count,
        cost = meeting.cost_in_money(model),
        cost_time = timefmt::format_seconds(meeting.cost_in_seconds()),
    )
}

/// The summary block printed at the end of a report run.
pub fn summary_block(report: &Report) -> String {
    format!(
        "\nNumber of Meetings: {count}\n\
         \n\
         Weekly Costs\n\
         Time: {weekly_time}\n\
         Money: {weekly_money}\n\
         \n\
         Average Per Meeting\n\
         Time Cost: {avg_time}\n\
         Financial Cost: {avg_money}\n\
         Duration: {avg_duration}\n\
         \n\
         Projected Yearly Costs\n\
         Time: {yearly_time}\n\
         Money: {yearly_money}\n\
         \n\
         Top 3 Meeting Times\n\
         {top1}\n\
         {top2}\n\
         {top3}\n\
         \n\
         {percent} of your time is spent in meetings\n\
         \n\
         Ideal Weekly Costs: {ideal_weekly_time} and {ideal_weekly_money}\n\
         Ideal Yearly Costs: {ideal_yearly_time} and {ideal_yearly_money}\n\
         \n\
         Potential Savings\n\
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
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    use crate::calculate;
    use crate::models::{AttendeePolicy, CostParams};

    fn model() -> CostModel {
        CostModel::from_params(&CostParams::default()).unwrap()
    }

    fn sample_meeting() -> Meeting {
        Meeting::new(
            1,
            Some("Standup".to_string()),
            DateTime::parse_from_rfc3339("2017-04-25T09:30:00+00:00").unwrap(),
            DateTime::parse_from_rfc3339("2017-04-25T10:00:00+00:00").unwrap(),
            None,
            AttendeePolicy::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_meeting_block_contains_fields() {
        let block = meeting_block(&sample_meeting(), &model());

        assert!(block.contains("Meeting 1: Standup"));
        assert!(block.contains("Number of Attendees: 1"));
        assert!(block.contains("30 minutes"));
    }

    #[test]
    fn test_summary_block_uses_report_strings() {
        let model = model();
        let report = calculate::build(&[sample_meeting()], &model);
        let block = summary_block(&report);

        assert!(block.contains("Number of Meetings: 1"));
        assert!(block.contains(&report.weekly_cost_money_readable));
        assert!(block.contains(&report.percent_time_readable));
        assert!(block.contains(&report.top_slot_1));
    }

    #[test]
    fn test_summary_block_empty_calendar() {
        let model = model();
        let report = calculate::build(&[], &model);
        let block = summary_block(&report);

        assert!(block.contains("Number of Meetings: 0"));
        assert!(block.contains("Calendar empty"));
    }
}
