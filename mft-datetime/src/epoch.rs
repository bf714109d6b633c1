/* Copyright 2024-2025 Joachim Metz <joachim.metz@gmail.com>
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may
 * obtain a copy of the License at https://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
 * WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied. See the
 * License for the specific language governing permissions and limitations
 * under the License.
 */

/// A fixed date and time used as a reference (epoch).
pub struct Epoch {
    /// The year.
    pub year: i16,

    /// The month.
    pub month: u8,

    /// The day of month.
    pub day_of_month: u8,
}

impl Epoch {
    pub fn new(year: i16, month: u8, day_of_month: u8) -> Self {
        Self {
            year: year,
            month: month,
            day_of_month: day_of_month,
        }
    }

    /// Converts a number of days relative to 1970-01-01 into a (year, month, day of month)
    /// tuple using the Howard Hinnant civil-from-days algorithm.
    pub fn civil_from_days(days: i64) -> (i32, u32, u32) {
        let z: i64 = days + 719468;
        let era: i64 = if z >= 0 { z } else { z - 146096 } / 146097;
        let day_of_era: i64 = z - era * 146097;
        let year_of_era: i64 = (day_of_era - day_of_era / 1460 + day_of_era / 36524
            - day_of_era / 146096)
            / 365;
        let year: i64 = year_of_era + era * 400;
        let day_of_year: i64 =
            day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
        let month_index: i64 = (5 * day_of_year + 2) / 153;
        let day_of_month: u32 = (day_of_year - (153 * month_index + 2) / 5 + 1) as u32;
        let month: u32 = if month_index < 10 {
            (month_index + 3) as u32
        } else {
            (month_index - 9) as u32
        };
        let year: i32 = if month <= 2 { (year + 1) as i32 } else { year as i32 };

        (year, month, day_of_month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let test_struct: Epoch = Epoch::new(1970, 1, 1);
        assert_eq!(test_struct.year, 1970);
        assert_eq!(test_struct.month, 1);
        assert_eq!(test_struct.day_of_month, 1);
    }

    #[test]
    fn test_civil_from_days_epoch() {
        assert_eq!(Epoch::civil_from_days(0), (1970, 1, 1));
    }

    #[test]
    fn test_civil_from_days_known_date() {
        // 2010-08-12 is 14833 days after 1970-01-01.
        assert_eq!(Epoch::civil_from_days(14833), (2010, 8, 12));
    }

    #[test]
    fn test_civil_from_days_before_epoch() {
        assert_eq!(Epoch::civil_from_days(-1), (1969, 12, 31));
    }
}
