//! Display labels and colors for status and priority codes.
//!
//! One table per enumeration, shared by every badge, table cell and chart
//! series so the same code always renders the same way. Unknown codes get a
//! neutral entry with a humanized label instead of an error.

use serde::Serialize;

/// How a status code renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusStyle {
    pub label: String,
    pub bg_class: &'static str,
    pub icon_class: &'static str,
    pub chart_color: &'static str,
}

/// How a priority code renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriorityStyle {
    pub label: String,
    pub bg_class: &'static str,
    pub badge_class: &'static str,
    pub chart_color: &'static str,
}

struct StatusEntry {
    code: &'static str,
    label: &'static str,
    bg_class: &'static str,
    icon_class: &'static str,
    chart_color: &'static str,
}

struct PriorityEntry {
    code: &'static str,
    label: &'static str,
    bg_class: &'static str,
    badge_class: &'static str,
    chart_color: &'static str,
}

static STATUS_TABLE: &[StatusEntry] = &[
    StatusEntry {
        code: "open",
        label: "Open",
        bg_class: "bg-blue-100 text-blue-800",
        icon_class: "text-blue-500",
        chart_color: "#3b82f6",
    },
    StatusEntry {
        code: "in_progress",
        label: "In Progress",
        bg_class: "bg-yellow-100 text-yellow-800",
        icon_class: "text-yellow-500",
        chart_color: "#eab308",
    },
    StatusEntry {
        code: "on_hold",
        label: "On Hold",
        bg_class: "bg-orange-100 text-orange-800",
        icon_class: "text-orange-500",
        chart_color: "#f97316",
    },
    StatusEntry {
        code: "investigating",
        label: "Investigating",
        bg_class: "bg-purple-100 text-purple-800",
        icon_class: "text-purple-500",
        chart_color: "#a855f7",
    },
    StatusEntry {
        code: "known_error",
        label: "Known Error",
        bg_class: "bg-red-100 text-red-800",
        icon_class: "text-red-500",
        chart_color: "#ef4444",
    },
    StatusEntry {
        code: "resolved",
        label: "Resolved",
        bg_class: "bg-green-100 text-green-800",
        icon_class: "text-green-500",
        chart_color: "#22c55e",
    },
    StatusEntry {
        code: "closed",
        label: "Closed",
        bg_class: "bg-gray-100 text-gray-800",
        icon_class: "text-gray-500",
        chart_color: "#6b7280",
    },
    StatusEntry {
        code: "fulfilled",
        label: "Fulfilled",
        bg_class: "bg-emerald-100 text-emerald-800",
        icon_class: "text-emerald-500",
        chart_color: "#10b981",
    },
    StatusEntry {
        code: "rejected",
        label: "Rejected",
        bg_class: "bg-rose-100 text-rose-800",
        icon_class: "text-rose-500",
        chart_color: "#f43f5e",
    },
];

// Neutral style for codes not in the table.
const FALLBACK_BG_CLASS: &str = "bg-gray-100 text-gray-600";
const FALLBACK_ICON_CLASS: &str = "text-gray-400";
const FALLBACK_CHART_COLOR: &str = "#9ca3af";

static PRIORITY_TABLE: &[PriorityEntry] = &[
    PriorityEntry {
        code: "urgent",
        label: "Urgent",
        bg_class: "bg-red-100 text-red-800",
        badge_class: "border-red-500 text-red-700",
        chart_color: "#dc2626",
    },
    PriorityEntry {
        code: "high",
        label: "High",
        bg_class: "bg-orange-100 text-orange-800",
        badge_class: "border-orange-500 text-orange-700",
        chart_color: "#ea580c",
    },
    PriorityEntry {
        code: "medium",
        label: "Medium",
        bg_class: "bg-yellow-100 text-yellow-800",
        badge_class: "border-yellow-500 text-yellow-700",
        chart_color: "#ca8a04",
    },
    PriorityEntry {
        code: "low",
        label: "Low",
        bg_class: "bg-green-100 text-green-800",
        badge_class: "border-green-500 text-green-700",
        chart_color: "#16a34a",
    },
];

/// Resolve a status code. Matching ignores case and surrounding space.
pub fn resolve_status(code: &str) -> StatusStyle {
    let normalized = code.trim().to_ascii_lowercase();
    match STATUS_TABLE.iter().find(|e| e.code == normalized) {
        Some(e) => StatusStyle {
            label: e.label.to_string(),
            bg_class: e.bg_class,
            icon_class: e.icon_class,
            chart_color: e.chart_color,
        },
        None => StatusStyle {
            label: humanize(code),
            bg_class: FALLBACK_BG_CLASS,
            icon_class: FALLBACK_ICON_CLASS,
            chart_color: FALLBACK_CHART_COLOR,
        },
    }
}

/// Resolve a priority code. Unknown codes take the `low` style.
pub fn resolve_priority(code: &str) -> PriorityStyle {
    let normalized = code.trim().to_ascii_lowercase();
    let (entry, label) = match PRIORITY_TABLE.iter().find(|e| e.code == normalized) {
        Some(e) => (e, e.label.to_string()),
        None => (lowest_priority(), humanize(code)),
    };
    PriorityStyle {
        label,
        bg_class: entry.bg_class,
        badge_class: entry.badge_class,
        chart_color: entry.chart_color,
    }
}

fn lowest_priority() -> &'static PriorityEntry {
    &PRIORITY_TABLE[PRIORITY_TABLE.len() - 1]
}

/// "awaiting_vendor" -> "Awaiting Vendor". Empty input renders as "Unknown".
fn humanize(code: &str) -> String {
    let words: Vec<String> = code
        .split(['_', '-', ' '])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect();
    if words.is_empty() {
        "Unknown".to_string()
    } else {
        words.join(" ")
    }
}
