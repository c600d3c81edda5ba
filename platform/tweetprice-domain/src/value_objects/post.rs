pub const DEFAULT_DATE_COLUMN: &str = "date";
pub const DEFAULT_TIME_COLUMN: &str = "time";
pub const DEFAULT_TEXT_COLUMN: &str = "tweet";
pub const DEFAULT_ENGAGEMENT_COLUMN: &str = "likes_count";

/// Names of the three required post columns in the raw table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostColumns {
    pub date: String,
    pub time: String,
    pub text: String,
}

impl Default for PostColumns {
    fn default() -> Self {
        Self {
            date: DEFAULT_DATE_COLUMN.to_string(),
            time: DEFAULT_TIME_COLUMN.to_string(),
            text: DEFAULT_TEXT_COLUMN.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    /// Position of the post in the raw table; survives every filter and sort.
    pub row_id: usize,
    pub date: String,
    pub time: String,
    pub text: String,
    /// Values aligned with `PostTable::extra_columns`.
    pub extras: Vec<String>,
    pub engagement: Option<f64>,
}

impl Post {
    pub fn cells(&self) -> Vec<&str> {
        let mut cells = Vec::with_capacity(3 + self.extras.len());
        cells.push(self.date.as_str());
        cells.push(self.time.as_str());
        cells.push(self.text.as_str());
        cells.extend(self.extras.iter().map(String::as_str));
        cells
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PostTable {
    pub columns: PostColumns,
    pub extra_columns: Vec<String>,
    pub posts: Vec<Post>,
}

impl PostTable {
    pub fn headers(&self) -> Vec<String> {
        let mut headers = vec![
            self.columns.date.clone(),
            self.columns.time.clone(),
            self.columns.text.clone(),
        ];
        headers.extend(self.extra_columns.iter().cloned());
        headers
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

/// Column selection and filtering applied to the raw post table.
#[derive(Debug, Clone, PartialEq)]
pub struct PostFilter {
    pub columns: PostColumns,
    pub extra_columns: Vec<String>,
    /// Keep posts whose engagement is strictly greater than this value.
    pub min_engagement: Option<f64>,
    pub engagement_column: String,
    /// Case-insensitive regular expression matched against the post text.
    pub keyword_pattern: Option<String>,
    pub sort_by_engagement: bool,
    pub ascending: bool,
}

impl Default for PostFilter {
    fn default() -> Self {
        Self {
            columns: PostColumns::default(),
            extra_columns: Vec::new(),
            min_engagement: None,
            engagement_column: DEFAULT_ENGAGEMENT_COLUMN.to_string(),
            keyword_pattern: None,
            sort_by_engagement: false,
            ascending: false,
        }
    }
}

impl PostFilter {
    pub fn needs_engagement(&self) -> bool {
        self.min_engagement.is_some() || self.sort_by_engagement
    }
}
