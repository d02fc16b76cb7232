// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod handler_tests;

use time::OffsetDateTime;
use time::macros::datetime;

fn test_now() -> OffsetDateTime {
    datetime!(2025-09-01 12:00 UTC)
}
