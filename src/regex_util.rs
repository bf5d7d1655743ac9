// Copyright (C) 2025 The phonefinder developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use regex::{Captures, Match, Regex};

/// Whole-string match, the way an anchored `^pattern$` would behave.
pub trait RegexFullMatch {
    fn full_match(&self, s: &str) -> bool;
}

/// Match anchored at the start of the input only.
pub trait RegexConsume {
    fn matches_start(&self, s: &str) -> bool {
        self.find_start(s).is_some()
    }

    fn captures_start<'a>(&self, s: &'a str) -> Option<Captures<'a>>;
    fn find_start<'a>(&self, s: &'a str) -> Option<Match<'a>>;
}

impl RegexFullMatch for Regex {
    fn full_match(&self, s: &str) -> bool {
        match self.find(s) {
            Some(matched) => matched.start() == 0 && matched.end() == s.len(),
            None => false,
        }
    }
}

impl RegexConsume for Regex {
    fn captures_start<'a>(&self, s: &'a str) -> Option<Captures<'a>> {
        let captures = self.captures(s)?;
        if captures.get(0)?.start() != 0 {
            return None;
        }
        Some(captures)
    }

    fn find_start<'a>(&self, s: &'a str) -> Option<Match<'a>> {
        let found = self.find(s)?;
        if found.start() != 0 {
            return None;
        }
        Some(found)
    }
}

/// Truncates `candidate` at the start of the first match of `pattern`,
/// leaving it untouched when the pattern does not occur.
pub fn trim_after_first_match<'a>(pattern: &Regex, candidate: &'a str) -> &'a str {
    match pattern.find(candidate) {
        Some(matched) => &candidate[..matched.start()],
        None => candidate,
    }
}
