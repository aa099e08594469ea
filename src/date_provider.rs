use chrono::{DateTime, FixedOffset, Local, NaiveDate, TimeZone, Timelike};

/// Source of the reference instant handed to the aggregation functions.
/// The analytics code never asks a clock itself; the caller picks `now`
/// once per snapshot through one of these.
pub trait DateProvider: Send + Sync {
    /// The current instant, carrying the offset to treat as local time
    fn get_current_time(&self) -> DateTime<FixedOffset>;
}

/// System clock in the machine's local time zone
pub struct SystemDateProvider;

impl DateProvider for SystemDateProvider {
    fn get_current_time(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Date provider that uses an overridden date instead of system time
/// Preserves the current local hours/minutes/seconds from system time
pub struct OverrideDateProvider {
    override_date: NaiveDate,
}

impl OverrideDateProvider {
    pub fn new(override_date: NaiveDate) -> Self {
        Self { override_date }
    }
}

impl DateProvider for OverrideDateProvider {
    fn get_current_time(&self) -> DateTime<FixedOffset> {
        let now = Local::now().fixed_offset();
        let naive = self
            .override_date
            .and_hms_opt(now.hour(), now.minute(), now.second())
            .unwrap_or_else(|| self.override_date.and_time(chrono::NaiveTime::MIN));
        now.timezone()
            .from_local_datetime(&naive)
            .single()
            .unwrap_or(now)
    }
}

/// Always returns the same instant
pub struct FixedDateProvider {
    instant: DateTime<FixedOffset>,
}

impl FixedDateProvider {
    pub fn new(instant: DateTime<FixedOffset>) -> Self {
        Self { instant }
    }
}

impl DateProvider for FixedDateProvider {
    fn get_current_time(&self) -> DateTime<FixedOffset> {
        self.instant
    }
}
