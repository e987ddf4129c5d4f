use serde::Deserialize;

pub const QUESTIONS_PER_PAGE: usize = 10;

/// `?page=N` query. Anything that does not parse as an integer counts as page 1.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    pub fn page(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<i64>().ok())
            .unwrap_or(1)
    }
}

/// Items `[(page-1)*10, page*10)` of `items`. Empty for `page < 1` or past the end.
pub fn paginate<T>(items: &[T], page: i64) -> &[T] {
    if page < 1 {
        return &[];
    }
    let start = usize::try_from(page - 1)
        .ok()
        .and_then(|p| p.checked_mul(QUESTIONS_PER_PAGE));
    match start {
        Some(start) if start < items.len() => {
            let end = (start + QUESTIONS_PER_PAGE).min(items.len());
            &items[start..end]
        }
        _ => &[],
    }
}
