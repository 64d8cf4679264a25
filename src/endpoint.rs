// URL templates for the supported Toast endpoints, relative to the base URL.

pub const ORDERS_ENDPOINT: &str = "orders/v2/orders/";
pub const LABOR_ENDPOINT: &str = "labor/v1/";
pub const JOBS_ENDPOINT: &str = "jobs/";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Order { guid: String },
    /// Bounds are already rendered with `dates::format_range_bound`.
    OrdersInRange { start: String, end: String },
    /// Business date is passed through as given (Toast uses `yyyyMMdd`).
    OrdersByBusinessDate { date: String },
    Jobs,
    Employee { guid: String },
    Employees,
}

impl Endpoint {
    pub fn path(&self) -> String {
        match self {
            Endpoint::Order { guid } => format!("{}{}", ORDERS_ENDPOINT, guid),
            Endpoint::OrdersInRange { start, end } => {
                format!("{}?startDate={}&endDate={}", ORDERS_ENDPOINT, start, end)
            }
            Endpoint::OrdersByBusinessDate { date } => {
                format!("{}?businessDate={}", ORDERS_ENDPOINT, date)
            }
            Endpoint::Jobs => JOBS_ENDPOINT.to_string(),
            Endpoint::Employee { guid } => format!("{}employee/{}", LABOR_ENDPOINT, guid),
            Endpoint::Employees => format!("{}employees/", LABOR_ENDPOINT),
        }
    }
}
