//! Market endpoints

use crate::error::Result;
use crate::executor::{EsiClient, EsiRequest, Page};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A node of the in-game market browser tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketGroup {
    /// Group description
    #[serde(default)]
    pub description: String,
    /// Group id
    pub market_group_id: u32,
    /// Group name
    pub name: String,
    /// Parent group, absent for top-level groups
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_group_id: Option<u32>,
    /// Item types listed directly in this group
    #[serde(default)]
    pub types: Vec<u32>,
}

/// Which side of the order book to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderType {
    /// Buy orders only
    Buy,
    /// Sell orders only
    Sell,
    /// Both sides
    #[default]
    All,
}

impl OrderType {
    /// Get the API parameter value
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
            Self::All => "all",
        }
    }
}

/// An open order in a region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketOrder {
    /// Days the order stays open after issue
    pub duration: u32,
    /// Buy order when true, sell order otherwise
    pub is_buy_order: bool,
    /// Issue time
    pub issued: DateTime<Utc>,
    /// Station or structure holding the order
    pub location_id: u64,
    /// Minimum volume per transaction
    pub min_volume: u32,
    /// Order id
    pub order_id: u64,
    /// Unit price in ISK
    pub price: f64,
    /// Buy-order range ("station", "region", "solarsystem" or a jump count)
    pub range: String,
    /// Solar system holding the order
    pub system_id: u32,
    /// Item type
    pub type_id: u32,
    /// Units still open
    pub volume_remain: u32,
    /// Units at issue
    pub volume_total: u32,
}

/// Universe-wide reference prices for an item type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketPrice {
    /// Rolling average price
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_price: Option<f64>,
    /// Price used for industry cost indices
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjusted_price: Option<f64>,
    /// Item type
    pub type_id: u32,
}

impl EsiClient {
    /// Get every market group id
    pub async fn market_group_ids(&self) -> Result<Vec<u32>> {
        self.fetch(EsiRequest::get("/v1/markets/groups/")).await
    }

    /// Get one market group
    pub async fn market_group(&self, market_group_id: u32) -> Result<MarketGroup> {
        self.fetch(EsiRequest::get(format!("/v1/markets/groups/{}/", market_group_id)))
            .await
    }

    /// Get one page of the open orders in a region
    pub async fn market_orders(&self, region_id: u32, order_type: OrderType, page: u32) -> Result<Page<MarketOrder>> {
        let request = EsiRequest::get(format!("/v1/markets/{}/orders/", region_id))
            .param("order_type", order_type.as_str());
        self.fetch_page(request, page).await
    }

    /// Get average and adjusted prices for every traded type
    pub async fn market_prices(&self) -> Result<Vec<MarketPrice>> {
        self.fetch(EsiRequest::get("/v1/markets/prices/")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EsiError;
    use crate::executor::PageInfo;
    use crate::test_utils::{mock_client, ok};
    use crate::transport::{HttpMethod, TransportResponse};

    const ORDERS: &str = r#"[{
        "duration": 90,
        "is_buy_order": false,
        "issued": "2016-09-03T05:12:25Z",
        "location_id": 60005599,
        "min_volume": 1,
        "order_id": 4623824223,
        "price": 9.9,
        "range": "region",
        "system_id": 30000053,
        "type_id": 34,
        "volume_remain": 1296000,
        "volume_total": 2000000
    }]"#;

    #[test]
    fn test_order_type_as_str() {
        assert_eq!(OrderType::Buy.as_str(), "buy");
        assert_eq!(OrderType::Sell.as_str(), "sell");
        assert_eq!(OrderType::default().as_str(), "all");
    }

    #[tokio::test]
    async fn test_market_group_ids() {
        let client = mock_client(HttpMethod::Get, "/v1/markets/groups/", ok("[4,5,8]"));
        assert_eq!(client.market_group_ids().await.unwrap(), vec![4, 5, 8]);
    }

    #[tokio::test]
    async fn test_market_group() {
        let client = mock_client(
            HttpMethod::Get,
            "/v1/markets/groups/5/",
            ok(r#"{"description":"Small, fast vessels","market_group_id":5,"name":"Standard Frigates","parent_group_id":1361,"types":[582,583]}"#),
        );

        let group = client.market_group(5).await.unwrap();

        assert_eq!(group.name, "Standard Frigates");
        assert_eq!(group.parent_group_id, Some(1361));
        assert_eq!(group.types, vec![582, 583]);
    }

    #[tokio::test]
    async fn test_market_orders_page() {
        let client = mock_client(
            HttpMethod::Get,
            "/v1/markets/10000002/orders/?order_type=sell&page=3",
            ok(ORDERS).with_header("X-Pages", "12"),
        );

        let page = client.market_orders(10000002, OrderType::Sell, 3).await.unwrap();

        assert_eq!(page.info, PageInfo { page: 3, total_pages: 12 });
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].order_id, 4623824223);
        assert!(!page.items[0].is_buy_order);
    }

    #[tokio::test]
    async fn test_market_orders_bad_page_header() {
        let client = mock_client(
            HttpMethod::Get,
            "/v1/markets/10000002/orders/?order_type=all&page=1",
            ok(ORDERS).with_header("X-Pages", "lots"),
        );

        let err = client.market_orders(10000002, OrderType::All, 1).await.unwrap_err();
        assert!(matches!(err, EsiError::InvalidPageHeader(raw) if raw == "lots"));
    }

    #[tokio::test]
    async fn test_market_orders_unknown_region() {
        let client = mock_client(
            HttpMethod::Get,
            "/v1/markets/1/orders/?order_type=buy&page=1",
            TransportResponse::new(404, r#"{"error":"Requested page does not exist!"}"#),
        );

        let err = client.market_orders(1, OrderType::Buy, 1).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn test_market_prices() {
        let client = mock_client(
            HttpMethod::Get,
            "/v1/markets/prices/",
            ok(r#"[{"adjusted_price":306988.09,"average_price":306292.67,"type_id":32772},{"type_id":34}]"#),
        );

        let prices = client.market_prices().await.unwrap();

        assert_eq!(prices.len(), 2);
        assert_eq!(prices[0].type_id, 32772);
        assert_eq!(prices[1].average_price, None);
    }
}
