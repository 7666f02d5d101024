//! Dashboard route handler.

use askama::Template;
use askama_web::WebTemplate;
use tracing::instrument;

use matjari_core::{Identity, Route};

use crate::error::AppError;
use crate::middleware::{RequireIdentity, SessionContext};

/// Statistics tile.
#[derive(Debug, Clone)]
pub struct StatView {
    pub title: &'static str,
    pub value: String,
    /// CSS modifier for the tile accent.
    pub tone: &'static str,
}

/// Activity item for dashboard.
#[derive(Debug, Clone)]
pub struct ActivityView {
    pub description: &'static str,
    pub time_ago: String,
    pub tone: &'static str,
}

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub user_name: String,
    pub plan_label: Option<&'static str>,
    pub current_path: &'static str,
    pub stats: Vec<StatView>,
    pub recent_activity: Vec<ActivityView>,
}

/// Overview tiles. Only the product total is live.
fn statistics(product_count: usize) -> Vec<StatView> {
    vec![
        StatView {
            title: "إجمالي المنتجات",
            value: product_count.to_string(),
            tone: "blue",
        },
        StatView {
            title: "الطلبات الجديدة",
            value: "12".to_string(),
            tone: "green",
        },
        StatView {
            title: "الزوار اليوم",
            value: "156".to_string(),
            tone: "purple",
        },
        StatView {
            title: "إجمالي المبيعات",
            value: "1,240 ريال".to_string(),
            tone: "amber",
        },
    ]
}

fn recent_activity() -> Vec<ActivityView> {
    [
        ("تم تلقي طلب جديد #1234", "green"),
        ("تمت إضافة منتج جديد \"قميص قطني\"", "blue"),
        ("عميل جديد قام بالتسجيل", "amber"),
    ]
    .into_iter()
    .zip(1..)
    .map(|((description, tone), hours)| ActivityView {
        description,
        time_ago: format!("منذ {hours} ساعات"),
        tone,
    })
    .collect()
}

impl DashboardTemplate {
    fn new(identity: &Identity, product_count: usize) -> Self {
        Self {
            user_name: identity.name.clone(),
            plan_label: identity.subscription.map(|tier| tier.label()),
            current_path: Route::Dashboard.path(),
            stats: statistics(product_count),
            recent_activity: recent_activity(),
        }
    }
}

/// Dashboard page handler.
#[instrument(skip_all, fields(email = %identity.email))]
pub async fn index(
    RequireIdentity(identity): RequireIdentity,
    context: SessionContext,
) -> Result<DashboardTemplate, AppError> {
    let catalog = context.catalog().await?;
    Ok(DashboardTemplate::new(&identity, catalog.len()))
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use matjari_core::SubscriptionTier;

    use super::*;

    #[test]
    fn test_product_total_tracks_catalog() {
        let stats = statistics(7);
        assert_eq!(stats.len(), 4);
        assert_eq!(stats[0].value, "7");
    }

    #[test]
    fn test_activity_times() {
        let times: Vec<_> = recent_activity().into_iter().map(|a| a.time_ago).collect();
        assert_eq!(times, vec!["منذ 1 ساعات", "منذ 2 ساعات", "منذ 3 ساعات"]);
    }

    #[test]
    fn test_plan_label() {
        let mut identity = Identity::placeholder("a@b.c");
        assert_eq!(DashboardTemplate::new(&identity, 0).plan_label, None);

        identity.subscription = Some(SubscriptionTier::Yearly);
        let template = DashboardTemplate::new(&identity, 4);
        assert_eq!(template.plan_label, Some("الاشتراك السنوي"));
        assert_eq!(template.user_name, "مستخدم متجري");
    }
}
