//! Shopper observations and their fixed-width policy encoding.
//!
//! Every category is encoded into the same 15-slot vector so the evaluator's
//! input shape never changes.  Slots that carry nothing for the active
//! category hold [`SENTINEL`].
//!
//! | Slot   | Purchase              | Navigation                | Distraction          |
//! |--------|-----------------------|---------------------------|----------------------|
//! | 0      | time spent (s)        | time spent (s)            | time spent (s)       |
//! | 1      | shopping progress     | shopping progress         | shopping progress    |
//! | 2      | list length at start  | list length at start      | list length at start |
//! | 3      | total items bought    | total items bought        | total items bought   |
//! | 4..=7  | bought per class      | –                         | bought per class     |
//! | 8      | current aisle class   | –                         | –                    |
//! | 9      | total items browsed   | –                         | –                    |
//! | 10     | aisle is on the list  | –                         | –                    |
//! | 11     | –                     | distance nearest overall  | –                    |
//! | 12     | –                     | distance nearest in list  | –                    |
//! | 13     | –                     | distance next in list     | –                    |
//! | 14     | –                     | –                         | distracting class    |

use shop_catalog::AisleClass;

use crate::DecisionCategory;

/// Width of an encoded observation.
pub const OBSERVATION_WIDTH: usize = 15;

/// Filler for slots that do not apply to the active category.
pub const SENTINEL: f32 = -1.0;

/// Same value the navigation oracle reports for unreachable targets.
const UNREACHABLE: f32 = 9999.0;

/// Snapshot of one shopper, copied into a request when it is enqueued.
#[derive(Clone, Debug, PartialEq)]
pub struct Observation {
    /// Whole seconds since the shopper spawned.
    pub time_spent:        u32,
    /// `1 - remaining / list_len_at_start`, in `[0, 1]`.
    pub shopping_progress: f32,
    /// Length of the shopping list when the shopper spawned.
    pub list_len_at_start: u32,
    pub total_bought:      u32,
    pub total_browsed:     u32,
    /// Items bought per [`AisleClass`], indexed by `AisleClass::index`.
    pub bought_per_class:  [u32; 4],

    /// Class of the aisle the shopper is heading to or standing at.
    pub current_class:     Option<AisleClass>,
    /// Whether that aisle is still on the shopping list.
    pub item_in_list:      bool,

    pub dist_nearest_overall: f32,
    pub dist_nearest_in_list: f32,
    pub dist_next_in_list:    f32,

    /// Class of the aisle that triggered the pending distraction.
    pub distracting_class: Option<AisleClass>,
}

impl Default for Observation {
    fn default() -> Self {
        Self {
            time_spent:           0,
            shopping_progress:    0.0,
            list_len_at_start:    0,
            total_bought:         0,
            total_browsed:        0,
            bought_per_class:     [0; 4],
            current_class:        None,
            item_in_list:         false,
            dist_nearest_overall: UNREACHABLE,
            dist_nearest_in_list: UNREACHABLE,
            dist_next_in_list:    UNREACHABLE,
            distracting_class:    None,
        }
    }
}

impl Observation {
    /// Encode for the evaluator with the slot layout described above.
    pub fn encode(&self, category: DecisionCategory) -> [f32; OBSERVATION_WIDTH] {
        let mut v = [SENTINEL; OBSERVATION_WIDTH];
        v[0] = self.time_spent as f32;
        v[1] = self.shopping_progress;
        v[2] = self.list_len_at_start as f32;
        v[3] = self.total_bought as f32;

        match category {
            DecisionCategory::Purchase => {
                self.write_bought_per_class(&mut v);
                v[8] = class_tag(self.current_class);
                v[9] = self.total_browsed as f32;
                v[10] = if self.item_in_list { 1.0 } else { 0.0 };
            }
            DecisionCategory::Navigation => {
                v[11] = self.dist_nearest_overall;
                v[12] = self.dist_nearest_in_list;
                v[13] = self.dist_next_in_list;
            }
            DecisionCategory::Distraction => {
                self.write_bought_per_class(&mut v);
                v[14] = class_tag(self.distracting_class);
            }
        }
        v
    }

    fn write_bought_per_class(&self, v: &mut [f32; OBSERVATION_WIDTH]) {
        for (slot, count) in v[4..8].iter_mut().zip(self.bought_per_class) {
            *slot = count as f32;
        }
    }
}

fn class_tag(class: Option<AisleClass>) -> f32 {
    class.map_or(SENTINEL, |c| c.index() as f32)
}
