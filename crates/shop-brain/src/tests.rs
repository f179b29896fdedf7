//! Unit tests for shop-brain.

use shop_catalog::AisleClass;
use shop_core::AgentId;

use crate::{
    ActionTriple, BrainKind, Decision, DecisionCategory, DecisionScheduler, DecisionTracker,
    NavigationAction, Observation, PurchaseAction, RewardTable, ScriptedPolicy, ShopperBrain,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn scripted(triple: ActionTriple, threshold: u32) -> DecisionScheduler<ScriptedPolicy> {
    DecisionScheduler::new(BrainKind::GoalOriented, ScriptedPolicy::constant(triple), threshold)
}

fn obs_at(time_spent: u32) -> Observation {
    Observation { time_spent, ..Observation::default() }
}

fn assert_close(a: f32, b: f32) {
    assert!((a - b).abs() < 1e-5, "{a} != {b}");
}

#[cfg(test)]
mod action_tests {
    use super::*;
    use crate::DistractionAction;

    #[test]
    fn triple_component_per_category() {
        let t = ActionTriple::new(1, 3, 0);
        assert_eq!(
            t.decision_for(DecisionCategory::Purchase),
            Some(Decision::Purchase(PurchaseAction::Browse))
        );
        assert_eq!(
            t.decision_for(DecisionCategory::Navigation),
            Some(Decision::Navigation(NavigationAction::Checkout))
        );
        assert_eq!(
            t.decision_for(DecisionCategory::Distraction),
            Some(Decision::Distraction(DistractionAction::Ignore))
        );
    }

    #[test]
    fn out_of_range_components_rejected() {
        let t = ActionTriple::new(3, 4, 2);
        for c in DecisionCategory::ALL {
            assert_eq!(t.decision_for(c), None, "{c}");
        }
    }

    #[test]
    fn decision_reports_its_category_and_raw_index() {
        let d = Decision::Navigation(NavigationAction::NextInList);
        assert_eq!(d.category(), DecisionCategory::Navigation);
        assert_eq!(d.raw(), 2);
    }
}

#[cfg(test)]
mod observation_tests {
    use super::*;
    use crate::SENTINEL;

    fn sample() -> Observation {
        Observation {
            time_spent:           42,
            shopping_progress:    0.25,
            list_len_at_start:    4,
            total_bought:         3,
            total_browsed:        2,
            bought_per_class:     [1, 0, 0, 2],
            current_class:        Some(AisleClass::Essentials),
            item_in_list:         true,
            dist_nearest_overall: 3.0,
            dist_nearest_in_list: 7.5,
            dist_next_in_list:    9.0,
            distracting_class:    Some(AisleClass::Offers),
        }
    }

    #[test]
    fn purchase_layout() {
        let v = sample().encode(DecisionCategory::Purchase);
        assert_eq!(
            v,
            [42.0, 0.25, 4.0, 3.0, 1.0, 0.0, 0.0, 2.0, 1.0, 2.0, 1.0, SENTINEL, SENTINEL, SENTINEL, SENTINEL]
        );
    }

    #[test]
    fn navigation_layout() {
        let v = sample().encode(DecisionCategory::Navigation);
        assert_eq!(&v[..4], &[42.0, 0.25, 4.0, 3.0]);
        assert!(v[4..11].iter().all(|x| *x == SENTINEL));
        assert_eq!(&v[11..14], &[3.0, 7.5, 9.0]);
        assert_eq!(v[14], SENTINEL);
    }

    #[test]
    fn distraction_layout() {
        let v = sample().encode(DecisionCategory::Distraction);
        assert_eq!(&v[4..8], &[1.0, 0.0, 0.0, 2.0]);
        assert!(v[8..14].iter().all(|x| *x == SENTINEL));
        assert_eq!(v[14], AisleClass::Offers.index() as f32);
    }

    #[test]
    fn missing_aisle_class_encodes_as_sentinel() {
        let v = Observation::default().encode(DecisionCategory::Purchase);
        assert_eq!(v[8], SENTINEL);
        assert_eq!(v[10], 0.0);
    }
}

#[cfg(test)]
mod reward_tests {
    use super::*;
    use crate::DistractionAction;

    fn table() -> RewardTable {
        RewardTable::goal_oriented()
    }

    fn purchase(a: PurchaseAction) -> Decision {
        Decision::Purchase(a)
    }

    #[test]
    fn buy_off_list_is_penalised() {
        let obs = Observation {
            list_len_at_start: 3,
            total_bought: 2,
            item_in_list: false,
            ..Observation::default()
        };
        assert_close(table().reward(purchase(PurchaseAction::Buy), &obs), -1.0);
    }

    #[test]
    fn buy_over_list_length_is_penalised() {
        let obs = Observation {
            list_len_at_start: 3,
            total_bought: 5,
            item_in_list: true,
            ..Observation::default()
        };
        assert_close(table().reward(purchase(PurchaseAction::Buy), &obs), 0.5);
    }

    #[test]
    fn browse_branches() {
        let mut obs = Observation { list_len_at_start: 4, ..Observation::default() };
        assert_close(table().reward(purchase(PurchaseAction::Browse), &obs), 0.5);

        obs.total_browsed = 7; // > 1.5 × 4
        assert_close(table().reward(purchase(PurchaseAction::Browse), &obs), -0.5);

        obs.item_in_list = true;
        assert_close(table().reward(purchase(PurchaseAction::Browse), &obs), -2.5);
    }

    #[test]
    fn ignore_listed_item_costs_more() {
        let mut obs = Observation::default();
        assert_close(table().reward(purchase(PurchaseAction::Ignore), &obs), -0.25);
        obs.item_in_list = true;
        assert_close(table().reward(purchase(PurchaseAction::Ignore), &obs), -1.0);
    }

    #[test]
    fn navigation_branches() {
        let t = table();
        let nav = Decision::Navigation;
        let early = Observation { shopping_progress: 0.2, ..Observation::default() };
        let late = Observation { shopping_progress: 0.95, ..Observation::default() };

        assert_close(t.reward(nav(NavigationAction::NearestOverall), &early), -0.5);
        assert_close(t.reward(nav(NavigationAction::NearestOverall), &late), 1.0);
        assert_close(t.reward(nav(NavigationAction::NearestInList), &early), 1.0);
        assert_close(t.reward(nav(NavigationAction::Checkout), &early), -5.0);
        assert_close(t.reward(nav(NavigationAction::Checkout), &late), 5.0);

        let detour = Observation {
            dist_nearest_in_list: 2.0,
            dist_next_in_list: 8.0,
            ..Observation::default()
        };
        assert_close(t.reward(nav(NavigationAction::NextInList), &detour), -0.5);
        let head_is_nearest = Observation {
            dist_nearest_in_list: 8.0,
            dist_next_in_list: 8.0,
            ..Observation::default()
        };
        assert_close(t.reward(nav(NavigationAction::NextInList), &head_is_nearest), 0.5);
    }

    #[test]
    fn distraction_prefers_offers() {
        let t = table();
        let follow = Decision::Distraction(DistractionAction::Follow);
        let offers = Observation { distracting_class: Some(AisleClass::Offers), ..Observation::default() };
        let fresh = Observation { distracting_class: Some(AisleClass::Fresh), ..Observation::default() };

        assert_close(t.reward(follow, &offers), 1.25);
        assert_close(t.reward(follow, &fresh), 0.5);
        assert_close(t.reward(Decision::Distraction(DistractionAction::Ignore), &fresh), 0.5);
    }

    #[test]
    fn every_kind_has_its_own_table() {
        assert_eq!(BrainKind::GoalOriented.reward_table(), RewardTable::goal_oriented());
        assert_ne!(RewardTable::impulse(), RewardTable::goal_oriented());
        assert_ne!(RewardTable::wanderer(), RewardTable::goal_oriented());
    }
}

#[cfg(test)]
mod episode_tests {
    use crate::EpisodeCounter;

    #[test]
    fn rolls_over_once_at_threshold() {
        let mut e = EpisodeCounter::new(3);
        e.record_delivery();
        e.record_delivery();
        assert!(!e.try_rollover(false));
        e.record_delivery();
        assert!(e.is_pending());
        assert!(!e.try_rollover(true), "must wait while an evaluation is in flight");
        assert!(e.try_rollover(false));
        assert!(!e.try_rollover(false));
        assert_eq!(e.delivered(), 0);
        assert_eq!(e.completed(), 1);
        assert_eq!(e.total_delivered(), 3);
    }

    #[test]
    fn zero_threshold_behaves_as_one() {
        let mut e = EpisodeCounter::new(0);
        e.record_delivery();
        assert!(e.try_rollover(false));
    }
}

#[cfg(test)]
mod scheduler_tests {
    use super::*;

    #[test]
    fn one_delivery_per_advance_in_fifo_order() {
        let mut s = scripted(ActionTriple::new(0, 1, 0), 100);
        let mut tracker = DecisionTracker::new();
        s.request_purchase(AgentId(2), obs_at(1));
        s.request_navigation(AgentId(0), obs_at(2));
        s.request_purchase(AgentId(1), obs_at(3));

        let order: Vec<_> = (0..3)
            .map(|_| {
                let d = s.advance(&mut tracker).delivery.unwrap();
                (d.requester, d.category)
            })
            .collect();
        assert_eq!(
            order,
            vec![
                (AgentId(2), DecisionCategory::Purchase),
                (AgentId(0), DecisionCategory::Navigation),
                (AgentId(1), DecisionCategory::Purchase),
            ]
        );
        assert_eq!(s.advance(&mut tracker), Default::default());
    }

    #[test]
    fn duplicate_request_replaces_observation_in_place() {
        let mut s = scripted(ActionTriple::new(0, 0, 0), 100);
        s.request_purchase(AgentId(0), obs_at(1));
        s.request_purchase(AgentId(1), obs_at(2));
        s.request_purchase(AgentId(0), obs_at(9));
        assert_eq!(s.queue_len(), 2);

        let head = s.pending().next().unwrap();
        assert_eq!(head.requester, AgentId(0));
        assert_eq!(head.observation.time_spent, 9);
    }

    #[test]
    fn outstanding_until_taken() {
        let mut s = scripted(ActionTriple::new(2, 0, 0), 100);
        let mut tracker = DecisionTracker::new();
        let a = AgentId(5);
        assert!(!s.is_outstanding(a, DecisionCategory::Purchase));

        s.request_purchase(a, obs_at(0));
        assert!(s.is_outstanding(a, DecisionCategory::Purchase));
        assert!(!s.is_outstanding(a, DecisionCategory::Navigation));
        assert_eq!(s.take_decision(a, DecisionCategory::Purchase), None);

        s.advance(&mut tracker);
        assert!(s.is_outstanding(a, DecisionCategory::Purchase));
        assert_eq!(
            s.take_decision(a, DecisionCategory::Purchase),
            Some(Decision::Purchase(PurchaseAction::Ignore))
        );
        assert!(!s.is_outstanding(a, DecisionCategory::Purchase));
        assert_eq!(s.take_decision(a, DecisionCategory::Purchase), None);
    }

    #[test]
    fn request_while_result_waiting_is_ignored() {
        let mut s = scripted(ActionTriple::new(0, 0, 0), 100);
        let mut tracker = DecisionTracker::new();
        s.request_purchase(AgentId(0), obs_at(0));
        s.advance(&mut tracker);
        s.request_purchase(AgentId(0), obs_at(1));
        assert_eq!(s.queue_len(), 0);
    }

    #[test]
    fn invalid_action_delivers_nothing_and_clears_flag() {
        let mut s = scripted(ActionTriple::new(7, 0, 0), 100);
        let mut tracker = DecisionTracker::new();
        s.request_purchase(AgentId(0), obs_at(0));

        let report = s.advance(&mut tracker);
        let d = report.delivery.unwrap();
        assert_eq!(d.decision, None);
        assert_eq!(d.reward, 0.0);
        assert!(!s.is_outstanding(AgentId(0), DecisionCategory::Purchase));
        assert_eq!(s.policy().rewards, vec![0.0]);
        assert_eq!(tracker.total_decisions(), 0);
    }

    #[test]
    fn reward_fed_to_policy_and_tracker_updated() {
        // Buy, not on the list, bought ≤ list length ⇒ −1.
        let mut s = scripted(ActionTriple::new(0, 0, 0), 100);
        let mut tracker = DecisionTracker::new();
        let obs = Observation { list_len_at_start: 3, total_bought: 1, ..Observation::default() };
        s.request_purchase(AgentId(0), obs);
        s.advance(&mut tracker);

        assert_eq!(s.policy().rewards.len(), 1);
        assert_close(s.policy().rewards[0], -1.0);
        assert_eq!(s.policy().evaluated[0].0, DecisionCategory::Purchase);
        assert_eq!(
            tracker.count(BrainKind::GoalOriented, Decision::Purchase(PurchaseAction::Buy)),
            1
        );
    }

    #[test]
    fn episode_ends_once_after_threshold() {
        let mut s = scripted(ActionTriple::new(1, 1, 1), 3);
        let mut tracker = DecisionTracker::new();
        let mut ended = Vec::new();
        for i in 0..7 {
            s.request_navigation(AgentId(i), obs_at(0));
        }
        for _ in 0..7 {
            ended.push(s.advance(&mut tracker).episode_ended);
        }
        assert_eq!(ended, vec![false, false, true, false, false, true, false]);
        assert_eq!(s.policy().episodes_ended, 2);
        assert_eq!(s.episode().delivered(), 1);
    }

    #[test]
    fn forget_drops_queued_and_waiting() {
        let mut s = scripted(ActionTriple::new(0, 0, 0), 100);
        let mut tracker = DecisionTracker::new();
        s.request_purchase(AgentId(0), obs_at(0));
        s.advance(&mut tracker);
        s.request_navigation(AgentId(0), obs_at(0));
        s.request_navigation(AgentId(1), obs_at(0));

        s.forget(AgentId(0));
        assert_eq!(s.queue_len(), 1);
        assert!(!s.is_outstanding(AgentId(0), DecisionCategory::Purchase));
        assert!(!s.is_outstanding(AgentId(0), DecisionCategory::Navigation));
        assert!(s.is_outstanding(AgentId(1), DecisionCategory::Navigation));
    }
}

#[cfg(test)]
mod brain_set_tests {
    use shop_core::SimRng;

    use super::*;
    use crate::{BoxedPolicy, BrainSet};

    #[test]
    fn kinds_parse_and_display() {
        assert_eq!("Impulse".parse::<BrainKind>().unwrap(), BrainKind::Impulse);
        assert_eq!("goal-oriented".parse::<BrainKind>().unwrap(), BrainKind::GoalOriented);
        assert!("robot".parse::<BrainKind>().is_err());
        assert_eq!(BrainKind::Wanderer.to_string(), "wanderer");
    }

    #[test]
    fn random_policies_stay_in_range() {
        let mut rng = SimRng::new(1);
        let mut set = BrainSet::with_random_policies(1000, &mut rng);
        let mut tracker = DecisionTracker::new();
        for round in 0..50u32 {
            for kind in BrainKind::ALL {
                for c in DecisionCategory::ALL {
                    set.get_mut(kind).request(AgentId(round), c, obs_at(round));
                }
            }
            for _ in 0..3 {
                for (_, report) in set.advance_all(&mut tracker) {
                    let d = report.delivery.unwrap();
                    assert!(d.decision.is_some());
                }
            }
        }
        assert_eq!(tracker.total_decisions(), 50 * 3 * 3);
    }

    #[test]
    fn each_kind_has_an_independent_queue() {
        let mut rng = SimRng::new(2);
        let mut set = BrainSet::with_random_policies(10, &mut rng);
        set.get_mut(BrainKind::Impulse).request_purchase(AgentId(0), obs_at(0));
        assert_eq!(set.get(BrainKind::Impulse).queue_len(), 1);
        assert_eq!(set.get(BrainKind::GoalOriented).queue_len(), 0);

        set.forget(AgentId(0));
        assert_eq!(set.get(BrainKind::Impulse).queue_len(), 0);
    }

    #[test]
    fn install_replaces_scheduler() {
        let mut rng = SimRng::new(3);
        let mut set = BrainSet::with_random_policies(10, &mut rng);
        let policy: BoxedPolicy = Box::new(ScriptedPolicy::constant(ActionTriple::new(0, 3, 0)));
        set.install(DecisionScheduler::new(BrainKind::Wanderer, policy, 10));

        let mut tracker = DecisionTracker::new();
        set.get_mut(BrainKind::Wanderer).request_navigation(AgentId(4), obs_at(0));
        set.advance_all(&mut tracker);
        assert_eq!(
            set.get_mut(BrainKind::Wanderer).take_decision(AgentId(4), DecisionCategory::Navigation),
            Some(Decision::Navigation(NavigationAction::Checkout))
        );
    }
}

#[cfg(test)]
mod tracker_tests {
    use super::*;

    #[test]
    fn counts_by_brain_category_and_action() {
        let mut t = DecisionTracker::new();
        let buy = Decision::Purchase(PurchaseAction::Buy);
        t.record_decision(BrainKind::Impulse, buy);
        t.record_decision(BrainKind::Impulse, buy);
        t.record_decision(BrainKind::Impulse, Decision::Purchase(PurchaseAction::Browse));
        t.record_decision(BrainKind::Wanderer, buy);

        assert_eq!(t.count(BrainKind::Impulse, buy), 2);
        assert_eq!(t.category_total(BrainKind::Impulse, DecisionCategory::Purchase), 3);
        assert_eq!(t.category_total(BrainKind::Impulse, DecisionCategory::Navigation), 0);
        assert_eq!(t.total_decisions(), 4);
    }

    #[test]
    fn exits_are_counted_per_kind() {
        let mut t = DecisionTracker::new();
        t.record_exit(BrainKind::GoalOriented);
        t.record_exit(BrainKind::GoalOriented);
        assert_eq!(t.exits(BrainKind::GoalOriented), 2);
        assert_eq!(t.exits(BrainKind::Impulse), 0);
        t.reset();
        assert_eq!(t.total_exits(), 0);
    }
}

#[cfg(test)]
mod scheduler_properties {
    use std::collections::HashMap;

    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn distinct_requests_delivered_in_request_order(n in 1usize..40) {
            let mut s = scripted(ActionTriple::new(0, 0, 0), 1000);
            let mut tracker = DecisionTracker::new();
            for i in 0..n {
                s.request_purchase(AgentId(i as u32), obs_at(i as u32));
            }
            for i in 0..n {
                let d = s.advance(&mut tracker).delivery.unwrap();
                prop_assert_eq!(d.requester, AgentId(i as u32));
            }
            prop_assert!(s.advance(&mut tracker).delivery.is_none());
        }

        #[test]
        fn duplicates_keep_first_slot_and_last_observation(
            requests in prop::collection::vec((0u32..6, 0usize..3, 0u32..1000), 1..60),
        ) {
            let mut s = scripted(ActionTriple::new(0, 0, 0), 1000);
            let mut tracker = DecisionTracker::new();
            let mut order = Vec::new();
            let mut latest = HashMap::new();

            for (agent, cat, t) in requests {
                let key = (AgentId(agent), DecisionCategory::ALL[cat]);
                if !order.contains(&key) {
                    order.push(key);
                }
                latest.insert(key, t);
                s.request(key.0, key.1, obs_at(t));
            }
            prop_assert_eq!(s.queue_len(), order.len());

            for key in order {
                let d = s.advance(&mut tracker).delivery.unwrap();
                prop_assert_eq!((d.requester, d.category), key);
                let seen = s.policy().evaluated.last().unwrap().1[0];
                prop_assert_eq!(seen, latest[&key] as f32);
            }
        }
    }
}
