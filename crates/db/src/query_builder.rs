//! Parameterized SQL for the filtered reports.
//!
//! Filters become a conjunction of predicates with `$n` placeholders and an
//! ordered value list. Nothing here touches a connection.

use chrono::NaiveDate;
use leasebook_core::filter::{CustomerFilter, CustomerStatusFilter, PaymentFilter, PaymentStatusFilter};
use sea_orm::{DbBackend, Statement, Value};

/// SQL condition for an unsettled payment row under `alias`.
fn unpaid(alias: &str) -> String {
    format!("{alias}.status <> 'paid'")
}

/// A conjunction of SQL predicates and the values they bind.
#[derive(Debug, Clone, Default)]
pub struct SqlPredicate {
    clauses: Vec<String>,
    values: Vec<Value>,
}

impl SqlPredicate {
    /// Creates an empty predicate, which matches every row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a value and returns its placeholder.
    pub fn bind(&mut self, value: impl Into<Value>) -> String {
        self.values.push(value.into());
        format!("${}", self.values.len())
    }

    /// Adds a clause to the conjunction.
    pub fn push(&mut self, clause: impl Into<String>) {
        self.clauses.push(clause.into());
    }

    /// Returns true if no clause has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Renders the clauses joined with `AND`, or `TRUE` when there are none.
    #[must_use]
    pub fn to_where(&self) -> String {
        if self.clauses.is_empty() {
            "TRUE".to_string()
        } else {
            self.clauses
                .iter()
                .map(|c| format!("({c})"))
                .collect::<Vec<_>>()
                .join(" AND ")
        }
    }

    /// Bound values in placeholder order.
    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Wraps `sql` and the bound values into a Postgres statement.
    #[must_use]
    pub fn into_statement(self, sql: String) -> Statement {
        Statement::from_sql_and_values(DbBackend::Postgres, sql, self.values)
    }
}

/// Builds a case-insensitive `LIKE` pattern matching `term` literally.
#[must_use]
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Adds the customer filter's predicates over customers aliased `c`.
///
/// `today` is the placeholder already bound to the current date.
pub fn push_customer_filter(predicate: &mut SqlPredicate, filter: &CustomerFilter, today: &str) {
    match filter.status {
        Some(CustomerStatusFilter::Overdue) => predicate.push(format!(
            "EXISTS (SELECT 1 FROM payments op WHERE op.customer_id = c.id AND {} AND op.due_date < {today})",
            unpaid("op")
        )),
        Some(CustomerStatusFilter::Completed) => predicate.push(format!(
            "NOT EXISTS (SELECT 1 FROM payments op WHERE op.customer_id = c.id AND {})",
            unpaid("op")
        )),
        None => {}
    }

    if let Some(term) = &filter.search {
        let p = predicate.bind(like_pattern(term));
        predicate.push(format!(
            r"c.full_name ILIKE {p} ESCAPE '\' OR c.phone ILIKE {p} ESCAPE '\'"
        ));
    }

    if let Some(brand) = &filter.car_brand {
        let p = predicate.bind(brand.clone());
        predicate.push(format!("c.car_brand = {p}"));
    }

    let range = filter.due_between;
    if !range.is_open() {
        let mut bounds = Vec::new();
        if let Some(start) = range.start {
            bounds.push(format!("rp.due_date >= {}", predicate.bind(start)));
        }
        if let Some(end) = range.end {
            bounds.push(format!("rp.due_date <= {}", predicate.bind(end)));
        }
        predicate.push(format!(
            "EXISTS (SELECT 1 FROM payments rp WHERE rp.customer_id = c.id AND {})",
            bounds.join(" AND ")
        ));
    }
}

/// Per-customer report over customers matching `filter`.
#[must_use]
pub fn customer_report_statement(filter: &CustomerFilter, today: NaiveDate) -> Statement {
    let mut predicate = SqlPredicate::new();
    let today = predicate.bind(today);
    push_customer_filter(&mut predicate, filter, &today);

    let sql = format!(
        r"SELECT
    c.id, c.full_name, c.phone, c.car_brand, c.car_model, c.car_year,
    c.leasing_amount, c.monthly_payment, c.lease_duration, c.start_date, c.created_at,
    COUNT(p.id) AS total_payments,
    COUNT(p.id) FILTER (WHERE p.status = 'paid') AS paid_payments,
    COALESCE(SUM(p.amount) FILTER (WHERE p.status = 'paid'), 0) AS total_paid,
    COALESCE(SUM(p.amount) FILTER (WHERE {unpaid}), 0) AS remaining_amount,
    MAX(p.payment_date) FILTER (WHERE p.status = 'paid') AS last_payment_date,
    MIN(p.due_date) FILTER (WHERE {unpaid}) AS next_due_date,
    COALESCE(BOOL_OR({unpaid} AND p.due_date < {today}), FALSE) AS is_overdue
FROM customers c
LEFT JOIN payments p ON p.customer_id = c.id
WHERE {predicate}
GROUP BY c.id
ORDER BY c.created_at DESC, c.id DESC",
        unpaid = unpaid("p"),
        predicate = predicate.to_where(),
    );

    predicate.into_statement(sql)
}

/// Payments joined with customers, filtered and ordered by due date.
#[must_use]
pub fn filtered_payments_statement(filter: &PaymentFilter, today: NaiveDate) -> Statement {
    let mut predicate = SqlPredicate::new();

    if let Some(start) = filter.due_between.start {
        let p = predicate.bind(start);
        predicate.push(format!("p.due_date >= {p}"));
    }
    if let Some(end) = filter.due_between.end {
        let p = predicate.bind(end);
        predicate.push(format!("p.due_date <= {p}"));
    }
    if let Some(name) = &filter.customer_name {
        let p = predicate.bind(like_pattern(name));
        predicate.push(format!(r"c.full_name ILIKE {p} ESCAPE '\'"));
    }
    if let Some(brand) = &filter.car_brand {
        let p = predicate.bind(brand.clone());
        predicate.push(format!("c.car_brand = {p}"));
    }
    match filter.status {
        Some(PaymentStatusFilter::Paid) => predicate.push("p.status = 'paid'"),
        Some(PaymentStatusFilter::Pending) => predicate.push(unpaid("p")),
        Some(PaymentStatusFilter::Overdue) => {
            let p = predicate.bind(today);
            predicate.push(format!("{} AND p.due_date < {p}", unpaid("p")));
        }
        None => {}
    }

    let sql = format!(
        r"SELECT
    p.id AS payment_id, p.customer_id, c.full_name AS customer_name, c.phone,
    c.car_brand, c.car_model, p.amount, p.due_date, p.payment_date, p.status
FROM payments p
JOIN customers c ON c.id = p.customer_id
WHERE {}
ORDER BY p.due_date ASC, p.id ASC",
        predicate.to_where()
    );

    predicate.into_statement(sql)
}

/// Portfolio totals for the financial summary.
#[must_use]
pub fn summary_statement(today: NaiveDate) -> Statement {
    let sql = format!(
        r"SELECT
    (SELECT COUNT(*) FROM customers) AS total_customers,
    (SELECT COALESCE(SUM(leasing_amount), 0) FROM customers) AS total_invested,
    (SELECT COALESCE(SUM(amount), 0) FROM payments WHERE status = 'paid') AS total_collected,
    (SELECT COALESCE(SUM(amount), 0) FROM payments p WHERE {unpaid_p}) AS total_pending,
    (SELECT COUNT(*) FROM customers c WHERE EXISTS (
        SELECT 1 FROM payments op WHERE op.customer_id = c.id AND {unpaid_op} AND op.due_date < $1
    )) AS overdue_customers,
    (SELECT COUNT(*) FROM customers c WHERE NOT EXISTS (
        SELECT 1 FROM payments op WHERE op.customer_id = c.id AND {unpaid_op}
    )) AS completed_customers",
        unpaid_p = unpaid("p"),
        unpaid_op = unpaid("op"),
    );
    Statement::from_sql_and_values(DbBackend::Postgres, sql, [today.into()])
}

/// Payments bucketed by due month.
#[must_use]
pub fn monthly_statement(today: NaiveDate) -> Statement {
    let sql = format!(
        r"SELECT
    to_char(p.due_date, 'YYYY-MM') AS period,
    COUNT(*) AS total_payments,
    COALESCE(SUM(p.amount), 0) AS total_amount,
    COALESCE(SUM(p.amount) FILTER (WHERE p.status = 'paid'), 0) AS collected_amount,
    COALESCE(SUM(p.amount) FILTER (WHERE {unpaid}), 0) AS pending_amount,
    COALESCE(SUM(p.amount) FILTER (WHERE {unpaid} AND p.due_date <= $1), 0) AS overdue_amount,
    COUNT(*) FILTER (WHERE {unpaid} AND p.due_date <= $1) AS overdue_count,
    COUNT(*) FILTER (WHERE p.status = 'paid') AS completed_count
FROM payments p
GROUP BY 1
ORDER BY 1 DESC",
        unpaid = unpaid("p"),
    );
    Statement::from_sql_and_values(DbBackend::Postgres, sql, [today.into()])
}

/// Customers bucketed by car brand.
#[must_use]
pub fn car_brand_statement() -> Statement {
    Statement::from_string(
        DbBackend::Postgres,
        r"SELECT
    car_brand,
    COUNT(*) AS customer_count,
    COALESCE(SUM(leasing_amount), 0) AS total_leasing_amount,
    ROUND(AVG(monthly_payment), 2) AS average_monthly_payment
FROM customers
WHERE car_brand IS NOT NULL
GROUP BY car_brand
ORDER BY customer_count DESC, car_brand ASC",
    )
}

/// Dashboard totals.
#[must_use]
pub fn dashboard_statement(today: NaiveDate) -> Statement {
    let sql = format!(
        r"SELECT
    (SELECT COUNT(*) FROM customers) AS total_customers,
    (SELECT COUNT(*) FROM customers c WHERE EXISTS (
        SELECT 1 FROM payments op WHERE op.customer_id = c.id AND {unpaid_op}
    )) AS active_customers,
    (SELECT COUNT(*) FROM customers c WHERE NOT EXISTS (
        SELECT 1 FROM payments op WHERE op.customer_id = c.id AND {unpaid_op}
    )) AS fully_paid_customers,
    (SELECT COALESCE(SUM(monthly_payment), 0) FROM customers) AS total_monthly_payments,
    (SELECT COALESCE(SUM(leasing_amount), 0) FROM customers) AS total_invested,
    (SELECT COALESCE(SUM(amount), 0) FROM payments WHERE status = 'paid') AS total_collected,
    (SELECT COALESCE(SUM(amount), 0) FROM payments p WHERE {unpaid_p}) AS total_pending,
    (SELECT COUNT(*) FROM payments p WHERE {unpaid_p} AND p.due_date < $1) AS overdue_payments",
        unpaid_p = unpaid("p"),
        unpaid_op = unpaid("op"),
    );
    Statement::from_sql_and_values(DbBackend::Postgres, sql, [today.into()])
}
