use super::test_helpers::*;
use super::*;
use crate::error::{Error, SkipReason};
use crate::types::{Event, ItemStatus};
