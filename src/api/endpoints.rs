//! Path builders for every remote endpoint the client talks to.

use super::request::ApiPath;

pub mod product {
    use super::ApiPath;

    pub fn all() -> ApiPath {
        ApiPath::new(["Product", "Product-Get"])
    }

    pub fn by_id(id: &str) -> ApiPath {
        ApiPath::new(["Product", "Product-Get-by-Product_ID", id])
    }

    pub fn by_brand(brand_id: &str) -> ApiPath {
        ApiPath::new(["Product", "Product-Get-by-Brand", brand_id])
    }

    pub fn by_showroom(showroom_id: &str) -> ApiPath {
        ApiPath::new(["Product", "Product-Get-by-ShowRoom", showroom_id])
    }

    pub fn create() -> ApiPath {
        ApiPath::new(["Product", "Product-Post"])
    }

    pub fn update(id: &str) -> ApiPath {
        ApiPath::new(["Product", "Product_Put", id])
    }

    pub fn image_edit() -> ApiPath {
        ApiPath::new(["Product", "Product-Image-Edit"])
    }
}

pub mod brand {
    use super::ApiPath;

    pub fn all() -> ApiPath {
        ApiPath::new(["Brand", "Get-Brand"])
    }

    pub fn create() -> ApiPath {
        ApiPath::new(["Brand", "Setup-Brand"])
    }

    pub fn update(id: &str) -> ApiPath {
        ApiPath::new(["Brand", "Put-Brand", id])
    }
}

pub mod category {
    use super::ApiPath;

    pub fn all() -> ApiPath {
        ApiPath::new(["Category", "Get-Category"])
    }

    pub fn create() -> ApiPath {
        ApiPath::new(["Category", "Setup-Category"])
    }

    pub fn update(id: &str) -> ApiPath {
        ApiPath::new(["Category", "Put-Category", id])
    }
}

pub mod showroom {
    use super::ApiPath;

    pub fn all() -> ApiPath {
        ApiPath::new(["ShowRoom", "Get-ShowRoom"])
    }

    pub fn create() -> ApiPath {
        ApiPath::new(["ShowRoom", "Setup-Showroom"])
    }

    pub fn update(id: &str) -> ApiPath {
        ApiPath::new(["ShowRoom", "Showroom-Put", id])
    }
}

pub mod order {
    use super::ApiPath;

    /// Dates are sent as `YYYY-MM-DD`.
    pub fn by_date(from: &str, to: &str) -> ApiPath {
        ApiPath::new(["Order", "GetOrdersByDate", from, to])
    }

    pub fn checkout(cart_id: &str, customer_id: &str) -> ApiPath {
        ApiPath::new(["Order", "CheckOut", cart_id, customer_id])
    }

    pub fn transition(cycle: &str, order_id: &str) -> ApiPath {
        ApiPath::new(["Order", "UpdateOrderTransition", cycle, order_id])
    }

    pub fn sales_order(order_id: &str) -> ApiPath {
        ApiPath::new(["Order", "SalesOrderGet", order_id])
    }

    pub fn delivery_address(order_id: &str) -> ApiPath {
        ApiPath::new(["Order", "GetOrderDeliveryAddress", order_id])
    }

    pub fn delivery_update(order_code: &str) -> ApiPath {
        ApiPath::new(["Order", "OrderDeliveryUpdate", order_code])
    }

    pub fn life_cycles() -> ApiPath {
        ApiPath::new(["Order", "OrderLifeCycle-Get"])
    }
}

pub mod cart {
    use super::ApiPath;

    pub fn get(tx: &str) -> ApiPath {
        ApiPath::new(["Cart", "Cart-Get", tx])
    }

    pub fn add() -> ApiPath {
        ApiPath::new(["Cart", "Cart-Post"])
    }

    pub fn set_quantity(tx: &str, product_id: &str, quantity: u32) -> ApiPath {
        ApiPath::new([
            "Cart".to_string(),
            "Cart-Put".to_string(),
            tx.to_string(),
            product_id.to_string(),
            quantity.to_string(),
        ])
    }

    pub fn remove(tx: &str, product_id: &str) -> ApiPath {
        ApiPath::new(["Cart", "Cart-Delete", tx, product_id])
    }
}

pub mod users {
    use super::ApiPath;

    pub fn create_customer() -> ApiPath {
        ApiPath::new(["Users", "Customer-Post"])
    }

    pub fn customers() -> ApiPath {
        ApiPath::new(["Users", "Customer-Get"])
    }

    pub fn customer_login(contact: &str, password: &str) -> ApiPath {
        ApiPath::new(["Users", "CustomerLogin", contact, password])
    }

    pub fn create_user() -> ApiPath {
        ApiPath::new(["Users", "User-Post"])
    }

    pub fn login(contact: &str, password: &str) -> ApiPath {
        ApiPath::new(["Users", "LogIn", contact, password])
    }

    pub fn all() -> ApiPath {
        ApiPath::new(["Users", "Users-Get"])
    }
}

pub mod shipping {
    use super::ApiPath;

    pub fn countries() -> ApiPath {
        ApiPath::new(["Shipping", "Country-Get"])
    }

    pub fn divisions(country_id: &str) -> ApiPath {
        ApiPath::new(["Shipping", "Division-Get", country_id])
    }

    pub fn locations(division_id: &str) -> ApiPath {
        ApiPath::new(["Shipping", "Location-Get", division_id])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_render_as_documented() {
        assert_eq!(
            product::by_id("p-1").to_string(),
            "/Product/Product-Get-by-Product_ID/p-1"
        );
        assert_eq!(
            order::by_date("2020-01-01", "2020-01-02").to_string(),
            "/Order/GetOrdersByDate/2020-01-01/2020-01-02"
        );
        assert_eq!(
            cart::set_quantity("tx-9", "p-1", 3).to_string(),
            "/Cart/Cart-Put/tx-9/p-1/3"
        );
        assert_eq!(
            users::login("01711000000", "secret").to_string(),
            "/Users/LogIn/01711000000/secret"
        );
    }
}
