// Backend metric payloads
//
// Each metric family has an explicit partial input type. Fields are all
// optional and decoded leniently, so any JSON value (including null) maps to
// a usable payload.
use super::lenient;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Raw payload bag: metric key -> whatever the backend returned.
pub type RawPayloads = HashMap<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    AdminStats,
    CompanyStats,
    VendorStats,
    VendorsDistribution,
    ContractStatus,
    MonthlyActivity,
    RevenueTrend,
    CompanyGrowth,
    ModuleUsage,
    EvaluationScores,
    RecentActivity,
}

impl Metric {
    pub fn key(self) -> &'static str {
        match self {
            Metric::AdminStats => "admin_stats",
            Metric::CompanyStats => "company_stats",
            Metric::VendorStats => "vendor_stats",
            Metric::VendorsDistribution => "vendors_distribution",
            Metric::ContractStatus => "contract_status",
            Metric::MonthlyActivity => "monthly_activity",
            Metric::RevenueTrend => "revenue_trend",
            Metric::CompanyGrowth => "company_growth",
            Metric::ModuleUsage => "module_usage",
            Metric::EvaluationScores => "evaluation_scores",
            Metric::RecentActivity => "recent_activity",
        }
    }

    /// Decode the raw payload for this metric. Never fails.
    pub fn decode(self, raw: Option<&Value>) -> MetricPayload {
        match self {
            Metric::AdminStats => MetricPayload::AdminStats(lenient::decode(raw)),
            Metric::CompanyStats => MetricPayload::CompanyStats(lenient::decode(raw)),
            Metric::VendorStats => MetricPayload::VendorStats(lenient::decode(raw)),
            Metric::VendorsDistribution => {
                MetricPayload::VendorsDistribution(lenient::decode(raw))
            }
            Metric::ContractStatus => {
                MetricPayload::ContractStatus(lenient::decode(wrap_list(raw, "statuses").as_ref()))
            }
            Metric::MonthlyActivity => {
                MetricPayload::MonthlyActivity(lenient::decode(wrap_list(raw, "items").as_ref()))
            }
            Metric::RevenueTrend => {
                MetricPayload::RevenueTrend(lenient::decode(wrap_list(raw, "items").as_ref()))
            }
            Metric::CompanyGrowth => {
                MetricPayload::CompanyGrowth(lenient::decode(wrap_list(raw, "items").as_ref()))
            }
            Metric::ModuleUsage => MetricPayload::ModuleUsage(decode_module_usage(raw)),
            Metric::EvaluationScores => {
                MetricPayload::EvaluationScores(lenient::decode(wrap_list(raw, "items").as_ref()))
            }
            Metric::RecentActivity => {
                MetricPayload::RecentActivity(lenient::decode(wrap_list(raw, "items").as_ref()))
            }
        }
    }
}

/// Bare arrays are wrapped as `{ <field>: [...] }` so list payloads may be
/// sent either bare or inside an object.
fn wrap_list(raw: Option<&Value>, field: &str) -> Option<Value> {
    match raw {
        Some(Value::Array(items)) => {
            let mut map = Map::new();
            map.insert(field.to_string(), Value::Array(items.clone()));
            Some(Value::Object(map))
        }
        other => other.cloned(),
    }
}

/// Module usage arrives as `{ "<module>": count, ... }`, optionally nested
/// under `modules`.
fn decode_module_usage(raw: Option<&Value>) -> ModuleUsagePayload {
    match raw {
        Some(Value::Object(map)) if map.get("modules").is_some_and(Value::is_object) => {
            lenient::decode(raw)
        }
        Some(value @ Value::Object(_)) => {
            let mut map = Map::new();
            map.insert("modules".to_string(), value.clone());
            lenient::decode(Some(&Value::Object(map)))
        }
        _ => ModuleUsagePayload::default(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MetricPayload {
    AdminStats(AdminStatsPayload),
    CompanyStats(CompanyStatsPayload),
    VendorStats(VendorStatsPayload),
    VendorsDistribution(VendorsDistributionPayload),
    ContractStatus(ContractStatusPayload),
    MonthlyActivity(MonthlyActivityPayload),
    RevenueTrend(RevenueTrendPayload),
    CompanyGrowth(CompanyGrowthPayload),
    ModuleUsage(ModuleUsagePayload),
    EvaluationScores(EvaluationScoresPayload),
    RecentActivity(RecentActivityPayload),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AdminStatsPayload {
    #[serde(deserialize_with = "lenient::number")]
    pub total_companies: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub total_users: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub active_contracts: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub total_projects: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompanyStatsPayload {
    #[serde(deserialize_with = "lenient::number")]
    pub total_vendors: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub active_contracts: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub ongoing_projects: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub pending_evaluations: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VendorStatsPayload {
    #[serde(deserialize_with = "lenient::number")]
    pub active_contracts: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub assigned_projects: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub total_contract_value: Option<f64>,
    #[serde(deserialize_with = "lenient::string")]
    pub currency: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub average_score: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct VendorsDistributionPayload {
    #[serde(deserialize_with = "lenient::number")]
    pub total: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub active: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub pending: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub suspended: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub inactive: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StatusCount {
    #[serde(deserialize_with = "lenient::string")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub count: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ContractStatusPayload {
    #[serde(deserialize_with = "lenient::number")]
    pub draft: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub active: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub completed: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub terminated: Option<f64>,
    #[serde(deserialize_with = "lenient::list")]
    pub statuses: Vec<StatusCount>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MonthlyActivityPoint {
    #[serde(deserialize_with = "lenient::string")]
    pub month: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub contracts: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub projects: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MonthlyActivityPayload {
    #[serde(alias = "data", deserialize_with = "lenient::list")]
    pub items: Vec<MonthlyActivityPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RevenuePoint {
    #[serde(deserialize_with = "lenient::string")]
    pub date: Option<String>,
    #[serde(alias = "revenue", deserialize_with = "lenient::number")]
    pub amount: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RevenueTrendPayload {
    #[serde(alias = "data", deserialize_with = "lenient::list")]
    pub items: Vec<RevenuePoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GrowthPoint {
    #[serde(deserialize_with = "lenient::string")]
    pub month: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub companies: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub users: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CompanyGrowthPayload {
    #[serde(alias = "data", deserialize_with = "lenient::list")]
    pub items: Vec<GrowthPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ModuleUsagePayload {
    #[serde(deserialize_with = "lenient::counts")]
    pub modules: Vec<(String, f64)>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EvaluationScore {
    #[serde(deserialize_with = "lenient::string")]
    pub category: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub quality: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub timeliness: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub cost: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EvaluationScoresPayload {
    #[serde(alias = "data", deserialize_with = "lenient::list")]
    pub items: Vec<EvaluationScore>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ActivityItem {
    #[serde(deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub description: Option<String>,
    #[serde(alias = "createdAt", deserialize_with = "lenient::string")]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RecentActivityPayload {
    #[serde(alias = "data", deserialize_with = "lenient::list")]
    pub items: Vec<ActivityItem>,
}
