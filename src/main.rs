use chrono::Utc;
use tracing::{error, info, warn, Instrument};

use order_vista::app_system::{setup_tracing, DashboardSystem, SystemConfig};
use order_vista::clients::DashboardClient;
use order_vista::dashboard::{relative_age, DashboardError, Fetch};
use order_vista::domain::Order;
use order_vista::verification::UnitKey;

/// Selects an order, scans every unit with its expected barcode and confirms.
async fn process_order(dashboard: &DashboardClient, id: &str) -> Result<Option<Order>, DashboardError> {
    let order = match dashboard.select_order(id.to_string()).await? {
        Fetch::Applied(order) => order,
        other => {
            warn!(outcome = ?other, "Order not available");
            return Ok(None);
        }
    };

    let units = dashboard.open_verification().await?;
    info!(units, "Scanning units");

    for item in &order.items {
        for ordinal in 0..item.quantity {
            let key = UnitKey::new(item.id.clone(), ordinal);
            dashboard
                .set_scanned_value(key.clone(), item.expected_barcode())
                .await?;
            let phase = dashboard.verify(key.clone()).await?;
            info!(unit = %key, ?phase, "Unit checked");
        }
    }

    dashboard.confirm_and_process().await.map(Some)
}

/// Scripted session against the mock repository: load the list, verify and
/// process the first new order, then look up an order that does not exist.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config = SystemConfig::from_env();
    info!(?config, "Starting order dashboard");
    let system = DashboardSystem::start(config);
    let dashboard = system.dashboard.clone();

    let orders = async {
        info!("Loading orders");
        dashboard.load_orders().await
    }
    .instrument(tracing::info_span!("order_list"))
    .await?;

    if let Fetch::Applied(orders) = &orders {
        let now = Utc::now();
        for order in orders {
            info!(
                order_id = %order.id,
                customer = %order.customer.name,
                status = %order.status,
                units = order.unit_count(),
                age = %relative_age(now, order.created_at),
                "Order"
            );
        }
    }

    let processed = process_order(&dashboard, "1001")
        .instrument(tracing::info_span!("order_processing", order_id = "1001"))
        .await;

    match processed {
        Ok(Some(order)) => info!(order_id = %order.id, status = %order.status, "Order processed"),
        Ok(None) => {}
        Err(e) => error!(error = %e, "Order processing failed"),
    }

    match dashboard.select_order("9999".to_string()).await? {
        Fetch::NotFound => info!("Order 9999 does not exist, as expected"),
        other => warn!(outcome = ?other, "Unexpected lookup result"),
    }

    for notice in dashboard.take_notices().await? {
        info!(level = ?notice.level, title = %notice.title, "{}", notice.message);
    }

    system.shutdown().await?;
    info!("Dashboard session complete");
    Ok(())
}
