// Stat cards and icon resolution
use crate::domain::dashboard::StatDescriptor;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    Building,
    Users,
    FileText,
    Briefcase,
    ClipboardCheck,
    DollarSign,
    Star,
    Truck,
    TrendingUp,
    Activity,
    LayoutDashboard,
}

/// Resolve an icon key from the layout or a transformer. Unknown keys get
/// the generic dashboard icon.
pub fn resolve_icon(key: &str) -> Icon {
    match key.trim().to_ascii_lowercase().as_str() {
        "building" | "company" | "companies" => Icon::Building,
        "users" | "user" => Icon::Users,
        "file-text" | "contract" | "contracts" => Icon::FileText,
        "briefcase" | "project" | "projects" => Icon::Briefcase,
        "clipboard-check" | "evaluation" | "evaluations" => Icon::ClipboardCheck,
        "dollar-sign" | "revenue" => Icon::DollarSign,
        "star" | "score" => Icon::Star,
        "truck" | "vendor" | "vendors" => Icon::Truck,
        "trending-up" => Icon::TrendingUp,
        "activity" => Icon::Activity,
        _ => Icon::LayoutDashboard,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatCardView {
    pub title: String,
    pub value: String,
    pub icon: Icon,
    pub color: String,
    pub bg_color: String,
}

pub fn render_stat(stat: &StatDescriptor) -> StatCardView {
    StatCardView {
        title: stat.title.clone(),
        value: stat.value.clone(),
        icon: resolve_icon(&stat.icon),
        color: stat.color.clone(),
        bg_color: stat.bg_color.clone(),
    }
}
