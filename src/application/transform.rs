// Dashboard data transformers - one pure function per metric family
//
// Each function translates backend vocabulary (status enums, counts,
// currency fields) into generic chart records or stat descriptors. Missing
// values are zero-filled or omitted; nothing here can fail.
use crate::domain::dashboard::{CenterText, StatDescriptor};
use crate::domain::payload::{
    AdminStatsPayload, CompanyGrowthPayload, CompanyStatsPayload, ContractStatusPayload,
    EvaluationScoresPayload, MetricPayload, ModuleUsagePayload, MonthlyActivityPayload,
    RecentActivityPayload, RevenueTrendPayload, VendorStatsPayload, VendorsDistributionPayload,
};
use crate::domain::series::{number, record, Record, Series};
use chrono::{DateTime, NaiveDate};
use convert_case::{Case, Casing};
use num_format::{Locale, ToFormattedString};
use serde_json::Value;

const BLUE: (&str, &str) = ("#3b82f6", "#eff6ff");
const GREEN: (&str, &str) = ("#10b981", "#ecfdf5");
const AMBER: (&str, &str) = ("#f59e0b", "#fffbeb");
const PURPLE: (&str, &str) = ("#8b5cf6", "#f5f3ff");

/// Output of a transformer: chart data for a panel, or the stat strip.
#[derive(Debug, Clone, PartialEq)]
pub enum Transformed {
    Series {
        data: Series,
        center_text: Option<CenterText>,
    },
    Stats(Vec<StatDescriptor>),
}

impl Transformed {
    fn series(data: Series) -> Self {
        Transformed::Series {
            data,
            center_text: None,
        }
    }
}

pub fn transform(payload: &MetricPayload) -> Transformed {
    match payload {
        MetricPayload::AdminStats(p) => Transformed::Stats(admin_stats(p)),
        MetricPayload::CompanyStats(p) => Transformed::Stats(company_stats(p)),
        MetricPayload::VendorStats(p) => Transformed::Stats(vendor_stats(p)),
        MetricPayload::VendorsDistribution(p) => {
            let (data, center) = vendors_distribution(p);
            Transformed::Series {
                data,
                center_text: Some(center),
            }
        }
        MetricPayload::ContractStatus(p) => Transformed::series(contract_status(p)),
        MetricPayload::MonthlyActivity(p) => Transformed::series(monthly_activity(p)),
        MetricPayload::RevenueTrend(p) => Transformed::series(revenue_trend(p)),
        MetricPayload::CompanyGrowth(p) => Transformed::series(company_growth(p)),
        MetricPayload::ModuleUsage(p) => Transformed::series(module_usage(p)),
        MetricPayload::EvaluationScores(p) => Transformed::series(evaluation_scores(p)),
        MetricPayload::RecentActivity(p) => Transformed::series(recent_activity(p)),
    }
}

fn stat(title: &str, value: String, icon: &str, (color, bg): (&str, &str)) -> StatDescriptor {
    StatDescriptor::new(title, value, icon, color, bg)
}

pub fn admin_stats(p: &AdminStatsPayload) -> Vec<StatDescriptor> {
    vec![
        stat("Total Companies", format_count(p.total_companies), "building", BLUE),
        stat("Total Users", format_count(p.total_users), "users", GREEN),
        stat("Active Contracts", format_count(p.active_contracts), "file-text", AMBER),
        stat("Total Projects", format_count(p.total_projects), "briefcase", PURPLE),
    ]
}

pub fn company_stats(p: &CompanyStatsPayload) -> Vec<StatDescriptor> {
    vec![
        stat("Total Vendors", format_count(p.total_vendors), "truck", BLUE),
        stat("Active Contracts", format_count(p.active_contracts), "file-text", GREEN),
        stat("Ongoing Projects", format_count(p.ongoing_projects), "briefcase", AMBER),
        stat(
            "Pending Evaluations",
            format_count(p.pending_evaluations),
            "clipboard-check",
            PURPLE,
        ),
    ]
}

pub fn vendor_stats(p: &VendorStatsPayload) -> Vec<StatDescriptor> {
    let score = match p.average_score {
        Some(score) => format!("{score:.1} / 5"),
        None => "N/A".to_string(),
    };
    vec![
        stat("Active Contracts", format_count(p.active_contracts), "file-text", BLUE),
        stat("Assigned Projects", format_count(p.assigned_projects), "briefcase", GREEN),
        stat(
            "Contract Value",
            format_currency(p.total_contract_value, p.currency.as_deref()),
            "dollar-sign",
            AMBER,
        ),
        stat("Average Score", score, "star", PURPLE),
    ]
}

pub fn vendors_distribution(p: &VendorsDistributionPayload) -> (Series, CenterText) {
    let buckets = [
        ("Active", p.active),
        ("Pending", p.pending),
        ("Suspended", p.suspended),
        ("Inactive", p.inactive),
    ];
    let data = share_series(buckets.iter().map(|(name, count)| (name.to_string(), count.unwrap_or(0.0))));

    let total = p
        .total
        .unwrap_or_else(|| buckets.iter().filter_map(|(_, count)| *count).sum());
    let center = CenterText {
        value: format_count(Some(total)),
        label: "Total Vendors".to_string(),
    };
    (data, center)
}

pub fn contract_status(p: &ContractStatusPayload) -> Series {
    if !p.statuses.is_empty() {
        let mut merged: Vec<(String, f64)> = Vec::new();
        for s in &p.statuses {
            let Some(status) = s.status.as_deref() else {
                continue;
            };
            let label = status.to_case(Case::Title);
            let count = s.count.unwrap_or(0.0);
            match merged.iter_mut().find(|(name, _)| *name == label) {
                Some((_, total)) => *total += count,
                None => merged.push((label, count)),
            }
        }
        return share_series(merged);
    }

    share_series(
        [
            ("Draft", p.draft),
            ("Active", p.active),
            ("Completed", p.completed),
            ("Terminated", p.terminated),
        ]
        .into_iter()
        .map(|(name, count)| (name.to_string(), count.unwrap_or(0.0))),
    )
}

pub fn monthly_activity(p: &MonthlyActivityPayload) -> Series {
    p.items
        .iter()
        .filter_map(|point| {
            let month = point.month.as_deref()?;
            Some(record([
                ("month", Value::from(month_label(month))),
                ("Contracts", number(point.contracts.unwrap_or(0.0))),
                ("Projects", number(point.projects.unwrap_or(0.0))),
            ]))
        })
        .collect()
}

pub fn revenue_trend(p: &RevenueTrendPayload) -> Series {
    p.items
        .iter()
        .filter_map(|point| {
            let date = point.date.as_deref()?;
            Some(record([
                ("date", Value::from(date_label(date))),
                ("Revenue", number(point.amount.unwrap_or(0.0))),
            ]))
        })
        .collect()
}

pub fn company_growth(p: &CompanyGrowthPayload) -> Series {
    p.items
        .iter()
        .filter_map(|point| {
            let month = point.month.as_deref()?;
            Some(record([
                ("name", Value::from(month_label(month))),
                ("Companies", number(point.companies.unwrap_or(0.0))),
                ("Users", number(point.users.unwrap_or(0.0))),
            ]))
        })
        .collect()
}

/// One single-field record per module; the bar renderer consolidates them.
pub fn module_usage(p: &ModuleUsagePayload) -> Series {
    p.modules
        .iter()
        .filter(|(name, _)| !name.trim().is_empty())
        .map(|(name, count)| record([(name.clone(), number(*count))]))
        .collect()
}

pub fn evaluation_scores(p: &EvaluationScoresPayload) -> Series {
    p.items
        .iter()
        .filter_map(|score| {
            let category = score.category.as_deref()?;
            Some(record([
                ("category", Value::from(category)),
                ("Quality", number(score.quality.unwrap_or(0.0))),
                ("Timeliness", number(score.timeliness.unwrap_or(0.0))),
                ("Cost", number(score.cost.unwrap_or(0.0))),
            ]))
        })
        .collect()
}

pub fn recent_activity(p: &RecentActivityPayload) -> Series {
    p.items
        .iter()
        .filter_map(|item| {
            let title = item.title.as_deref()?;
            Some(record([
                ("name", Value::from(title)),
                ("description", Value::from(item.description.clone().unwrap_or_default())),
                ("time", Value::from(item.timestamp.as_deref().map(time_label).unwrap_or_default())),
            ]))
        })
        .collect()
}

/// `{name, value, percentage}` records; zero and negative shares are dropped.
fn share_series<I>(shares: I) -> Series
where
    I: IntoIterator<Item = (String, f64)>,
{
    let shares: Vec<(String, f64)> = shares.into_iter().filter(|(_, v)| *v > 0.0).collect();
    let total: f64 = shares.iter().map(|(_, v)| v).sum();

    shares
        .into_iter()
        .map(|(name, value)| {
            let mut r = Record::new();
            r.insert("name".to_string(), Value::from(name));
            r.insert("value".to_string(), number(value));
            if total > 0.0 {
                let pct = (value / total * 1000.0).round() / 10.0;
                r.insert("percentage".to_string(), number(pct));
            }
            r
        })
        .collect()
}

fn parse_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d"))
        .ok()
}

/// "2024-03" or "2024-03-15" -> "Mar 2024"; anything else verbatim.
fn month_label(raw: &str) -> String {
    match parse_day(raw) {
        Some(day) => day.format("%b %Y").to_string(),
        None => raw.to_string(),
    }
}

/// "2024-03-15" -> "Mar 15"; anything else verbatim.
fn date_label(raw: &str) -> String {
    match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        Ok(day) => day.format("%b %d").to_string(),
        Err(_) => raw.to_string(),
    }
}

fn time_label(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw.trim()) {
        Ok(ts) => ts.format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}

fn format_count(value: Option<f64>) -> String {
    (value.unwrap_or(0.0).round() as i64).to_formatted_string(&Locale::en)
}

fn format_currency(value: Option<f64>, currency: Option<&str>) -> String {
    let amount = (value.unwrap_or(0.0).round() as i64).to_formatted_string(&Locale::en);
    match currency.map(str::trim) {
        None | Some("") | Some("USD") => format!("${amount}"),
        Some(code) => format!("{code} {amount}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payload::{Metric, StatusCount};
    use serde_json::json;

    #[test]
    fn test_vendors_distribution_center_text() {
        let payload = Metric::VendorsDistribution
            .decode(Some(&json!({"total": 42, "active": 30, "pending": 12, "suspended": 0})));
        let Transformed::Series { data, center_text } = transform(&payload) else {
            panic!("expected series");
        };

        assert_eq!(center_text.unwrap().value, "42");
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["name"], json!("Active"));
        assert_eq!(data[0]["value"], json!(30));
        assert_eq!(data[0]["percentage"], json!(71.4));
        assert_eq!(data[1]["percentage"], json!(28.6));
    }

    #[test]
    fn test_vendors_distribution_total_falls_back_to_sum() {
        let (_, center) = vendors_distribution(&VendorsDistributionPayload {
            active: Some(3.0),
            inactive: Some(2.0),
            ..Default::default()
        });
        assert_eq!(center.value, "5");
    }

    #[test]
    fn test_contract_status_maps_enum_vocabulary() {
        let data = contract_status(&ContractStatusPayload {
            statuses: vec![
                StatusCount { status: Some("ON_HOLD".into()), count: Some(1.0) },
                StatusCount { status: None, count: Some(9.0) },
                StatusCount { status: Some("active".into()), count: Some(3.0) },
            ],
            ..Default::default()
        });
        let names: Vec<&Value> = data.iter().map(|r| &r["name"]).collect();
        assert_eq!(names, vec![&json!("On Hold"), &json!("Active")]);
        assert_eq!(data[1]["percentage"], json!(75));
    }

    #[test]
    fn test_contract_status_merges_same_label() {
        let data = contract_status(&ContractStatusPayload {
            statuses: vec![
                StatusCount { status: Some("ACTIVE".into()), count: Some(3.0) },
                StatusCount { status: Some("in-progress".into()), count: Some(5.0) },
                StatusCount { status: Some("active".into()), count: Some(2.0) },
            ],
            ..Default::default()
        });
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["name"], json!("Active"));
        assert_eq!(data[0]["value"], json!(5));
        assert_eq!(data[0]["percentage"], json!(50));
        assert_eq!(data[1]["name"], json!("In Progress"));
    }

    #[test]
    fn test_null_input_degrades() {
        assert!(matches!(
            transform(&Metric::ContractStatus.decode(None)),
            Transformed::Series { data, .. } if data.is_empty()
        ));

        let stats = company_stats(&CompanyStatsPayload::default());
        assert_eq!(stats.len(), 4);
        assert!(stats.iter().all(|s| s.value == "0"));
    }

    #[test]
    fn test_monthly_activity_zero_fills_and_labels() {
        let payload = Metric::MonthlyActivity.decode(Some(&json!([
            {"month": "2024-03", "contracts": 4},
            {"contracts": 9},
            {"month": "Q2", "projects": "2"}
        ])));
        let Transformed::Series { data, .. } = transform(&payload) else {
            panic!("expected series");
        };
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["month"], json!("Mar 2024"));
        assert_eq!(data[0]["Projects"], json!(0));
        assert_eq!(data[1]["month"], json!("Q2"));
        assert_eq!(data[1]["Projects"], json!(2));
    }

    #[test]
    fn test_module_usage_emits_single_field_records() {
        let payload = Metric::ModuleUsage.decode(Some(&json!({"A": 10, "B": 20, "C": 5})));
        let Transformed::Series { data, .. } = transform(&payload) else {
            panic!("expected series");
        };
        assert_eq!(data, vec![
            record([("A", json!(10))]),
            record([("B", json!(20))]),
            record([("C", json!(5))]),
        ]);
    }

    #[test]
    fn test_vendor_stats_currency_and_score() {
        let stats = vendor_stats(&VendorStatsPayload {
            total_contract_value: Some(1_250_000.0),
            currency: Some("EUR".into()),
            average_score: Some(4.26),
            ..Default::default()
        });
        assert_eq!(stats[2].value, "EUR 1,250,000");
        assert_eq!(stats[3].value, "4.3 / 5");

        let usd = vendor_stats(&VendorStatsPayload {
            total_contract_value: Some(999.0),
            ..Default::default()
        });
        assert_eq!(usd[2].value, "$999");
        assert_eq!(usd[3].value, "N/A");
    }

    #[test]
    fn test_recent_activity_time_format() {
        let MetricPayload::RecentActivity(payload) = Metric::RecentActivity.decode(Some(&json!([
            {"title": "Contract signed", "createdAt": "2024-05-01T09:30:00Z"},
            {"description": "no title"}
        ]))) else {
            panic!("wrong variant");
        };
        let data = recent_activity(&payload);
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["time"], json!("2024-05-01 09:30"));
        assert_eq!(data[0]["description"], json!(""));
    }

    #[test]
    fn test_format_count_groups_thousands() {
        assert_eq!(format_count(None), "0");
        assert_eq!(format_count(Some(999.0)), "999");
        assert_eq!(format_count(Some(1000.0)), "1,000");
        assert_eq!(format_count(Some(-1_234_567.0)), "-1,234,567");
        assert_eq!(format_currency(Some(1_234.4), None), "$1,234");
    }

    #[test]
    fn test_transform_is_deterministic() {
        let payload = Metric::EvaluationScores.decode(Some(&json!([
            {"category": "Delivery", "quality": 3, "timeliness": 0, "cost": 2}
        ])));
        assert_eq!(transform(&payload), transform(&payload));
    }
}
