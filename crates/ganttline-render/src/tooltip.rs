//! Tooltip content
//!
//! What a row shows on hover. Optional parts (role, assignee, avatar,
//! description) are `None` when the data has nothing to show.

use ganttline_core::{non_blank, Avatar, DateLocale};
use ganttline_layout::RowLayout;
use serde::Serialize;

/// Hover details for one row
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipContent {
    pub title: String,
    pub role: Option<String>,
    /// Effective start, formatted for the locale
    pub start: String,
    /// Effective end, formatted for the locale
    pub end: String,
    pub progress: u8,
    pub assignee: Option<String>,
    pub avatar: Option<Avatar>,
    pub description: Option<String>,
}

impl TooltipContent {
    pub fn for_row(row: &RowLayout, locale: DateLocale) -> Self {
        Self {
            title: row.name.clone(),
            role: owned(row.assignee_role.as_deref()),
            start: locale.format_day(row.range.start),
            end: locale.format_day(row.range.end),
            progress: row.progress,
            assignee: owned(row.assignee_name.as_deref()),
            avatar: row.avatar.clone(),
            description: owned(row.description.as_deref()),
        }
    }

    /// Plain-text lines, one field per line
    pub fn lines(&self, locale: DateLocale) -> Vec<String> {
        let labels = Labels::for_locale(locale);
        let mut lines = vec![self.title.clone()];
        if let Some(role) = &self.role {
            lines.push(format!("{}: {role}", labels.role));
        }
        lines.push(format!("{}: {}", labels.start, self.start));
        lines.push(format!("{}: {}", labels.end, self.end));
        lines.push(format!("{}: {}%", labels.progress, self.progress));
        if let Some(assignee) = &self.assignee {
            lines.push(format!("{}: {assignee}", labels.assignee));
        }
        if let Some(description) = &self.description {
            lines.push(description.clone());
        }
        lines
    }

    pub fn to_text(&self, locale: DateLocale) -> String {
        self.lines(locale).join("\n")
    }
}

struct Labels {
    role: &'static str,
    start: &'static str,
    end: &'static str,
    progress: &'static str,
    assignee: &'static str,
}

impl Labels {
    fn for_locale(locale: DateLocale) -> Self {
        match locale {
            DateLocale::Es => Self {
                role: "Rol",
                start: "Inicio",
                end: "Fin",
                progress: "Progreso",
                assignee: "Asignado",
            },
            DateLocale::En => Self {
                role: "Role",
                start: "Start",
                end: "End",
                progress: "Progress",
                assignee: "Assignee",
            },
        }
    }
}

fn owned(value: Option<&str>) -> Option<String> {
    non_blank(value).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ganttline_core::{Activity, Project};
    use ganttline_layout::{GanttChart, LayoutConfig};
    use pretty_assertions::assert_eq;

    fn rows(activity: Activity) -> Vec<RowLayout> {
        let mut project = Project::new("Tips", "2024-01-01", "2024-01-31");
        project.activities.push(activity);
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let chart = GanttChart::with_today(project, LayoutConfig::default(), today).unwrap();
        chart.state().layout.rows.clone()
    }

    #[test]
    fn full_tooltip_in_spanish() {
        let rows = rows(
            Activity::new("A")
                .name("Análisis")
                .dates("2024-01-05", "2024-01-09")
                .progress(40)
                .assign("Ana Gómez", "Analista")
                .description("Revisión de requisitos"),
        );
        let tip = TooltipContent::for_row(&rows[0], DateLocale::Es);
        assert_eq!(
            tip.lines(DateLocale::Es),
            vec![
                "Análisis",
                "Rol: Analista",
                "Inicio: 05 ene",
                "Fin: 09 ene",
                "Progreso: 40%",
                "Asignado: Ana Gómez",
                "Revisión de requisitos",
            ]
        );
        assert_eq!(
            tip.avatar,
            Some(Avatar::Initials {
                text: "AG".into(),
                color: ganttline_core::avatar::palette_color("Ana Gómez").into(),
            })
        );
    }

    #[test]
    fn missing_metadata_is_omitted() {
        let rows = rows(Activity::new("B").dates("2024-01-02", "2024-01-02"));
        let tip = TooltipContent::for_row(&rows[0], DateLocale::En);
        assert_eq!(tip.role, None);
        assert_eq!(tip.assignee, None);
        assert_eq!(tip.avatar, None);
        assert_eq!(
            tip.to_text(DateLocale::En),
            "B\nStart: 02 Jan\nEnd: 02 Jan\nProgress: 0%"
        );
    }

    #[test]
    fn parent_tooltip_uses_effective_range() {
        let rows = rows(
            Activity::new("P")
                .dates("2023-01-01", "2023-01-02")
                .child(Activity::new("c").dates("2024-01-10", "2024-01-12")),
        );
        let tip = TooltipContent::for_row(&rows[0], DateLocale::Es);
        assert_eq!((tip.start.as_str(), tip.end.as_str()), ("10 ene", "12 ene"));
    }
}
