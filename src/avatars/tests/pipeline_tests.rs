use crate::avatars::config::EngineConfig;
use crate::avatars::conductor::RenderConductor;
use crate::avatars::types::{AvatarSource, GroupSnapshot, ListSnapshot, PageSnapshot};

fn group(id: &str, summary: &str) -> GroupSnapshot {
    GroupSnapshot {
        group_id: id.to_string(),
        summary: summary.to_string(),
    }
}

fn list(id: &str, root: Option<&str>, groups: Vec<GroupSnapshot>) -> ListSnapshot {
    ListSnapshot {
        list_id: id.to_string(),
        update_root_id: root.map(str::to_string),
        groups,
    }
}

fn page(avatars: Vec<(&str, &str)>, lists: Vec<ListSnapshot>, ratio: f64) -> PageSnapshot {
    PageSnapshot {
        current_user: "viewer".to_string(),
        device_pixel_ratio: ratio,
        avatars: avatars
            .into_iter()
            .map(|(alt, src)| AvatarSource {
                alt: alt.to_string(),
                src: src.to_string(),
            })
            .collect(),
        lists,
    }
}

#[test]
fn test_full_comment_thread_pass() {
    let mut conductor = RenderConductor::default();
    let snap = page(
        vec![
            ("@alice", "https://cdn.test/u/alice?s=40"),
            ("@ci-runner", "https://cdn.test/apps/ci-runner"),
        ],
        vec![
            list(
                "comment-1-reactions",
                Some("comment-1"),
                vec![
                    group(
                        "comment-1-thumbs",
                        "alice, viewer and ci-runner[bot] reacted with 👍",
                    ),
                    group("comment-1-heart", "bob reacted with ❤️"),
                ],
            ),
            list(
                "comment-2-reactions",
                Some("comment-2"),
                vec![group("comment-2-rocket", "carol and dan reacted with 🚀")],
            ),
        ],
        2.0,
    );

    let plan = conductor.render_pass(&snap);

    // First roster interleaves its two groups; the second follows whole.
    let names: Vec<&str> = plan.avatars.iter().map(|a| a.username.as_str()).collect();
    assert_eq!(names, vec!["alice", "bob", "ci-runner[bot]", "carol", "dan"]);

    // Page avatars are reused where present; everyone else gets the
    // pixel-ratio-scaled shortcut.
    assert_eq!(plan.avatars[0].image_url, "https://cdn.test/u/alice?s=40");
    assert_eq!(plan.avatars[1].image_url, "/bob.png?size=40");
    assert_eq!(plan.avatars[2].image_url, "https://cdn.test/apps/ci-runner");
    assert_eq!(plan.avatars[3].image_url, "/carol.png?size=40");

    // Link targets keep the username as parsed, bot tag included.
    assert_eq!(plan.avatars[2].href.as_deref(), Some("/ci-runner[bot]"));

    // Each avatar lands in the group it came from.
    assert_eq!(plan.avatars[0].group_id, "comment-1-thumbs");
    assert_eq!(plan.avatars[1].group_id, "comment-1-heart");
    assert_eq!(plan.avatars[4].group_id, "comment-2-rocket");

    // Capacity is headers-adjusted per roster.
    assert_eq!(plan.lists.len(), 2);
    assert_eq!(plan.lists[0].capacity, 30);
    assert_eq!(plan.lists[1].capacity, 33);

    assert_eq!(
        plan.subscriptions,
        vec!["comment-1".to_string(), "comment-2".to_string()]
    );

    assert_eq!(plan.stats.lists_planned, 2);
    assert_eq!(plan.stats.groups_parsed, 3);
    assert_eq!(plan.stats.names_parsed, 6);
    assert_eq!(plan.stats.dropped_current_user, 1);
    assert_eq!(plan.stats.avatars_planned, 5);
    assert_eq!(plan.stats.dropped_unresolvable, 0);
}

#[test]
fn test_update_cycle_replans_with_new_reactions() {
    let mut conductor = RenderConductor::default();
    let before = page(
        vec![],
        vec![list(
            "comment-1-reactions",
            Some("comment-1"),
            vec![group("comment-1-thumbs", "alice reacted with 👍")],
        )],
        1.0,
    );

    let first = conductor.render_pass(&before);
    assert_eq!(first.avatars.len(), 1);
    assert_eq!(first.subscriptions, vec!["comment-1".to_string()]);

    // Idempotent while nothing changes.
    let repeat = conductor.render_pass(&before);
    assert!(repeat.avatars.is_empty());

    // The host reports the comment body was swapped out, then snapshots the
    // fresh content.
    assert_eq!(conductor.notify_content_replaced("comment-1"), 1);
    let after = page(
        vec![],
        vec![list(
            "comment-1-reactions",
            Some("comment-1"),
            vec![group("comment-1-thumbs", "alice and bob reacted with 👍")],
        )],
        1.0,
    );

    let second = conductor.render_pass(&after);
    let names: Vec<&str> = second.avatars.iter().map(|a| a.username.as_str()).collect();
    assert_eq!(names, vec!["alice", "bob"]);
    assert!(second.subscriptions.is_empty(), "root stays subscribed");
}

#[test]
fn test_browser_family_preset_drops_hrefs() {
    let firefox = "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";
    let chrome = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";
    let snap = || {
        page(
            vec![],
            vec![list(
                "comment-1-reactions",
                None,
                vec![group("comment-1-thumbs", "alice and bob reacted with 👍")],
            )],
            1.0,
        )
    };

    let mut conductor = RenderConductor::new(EngineConfig::for_user_agent(firefox));
    let plan = conductor.render_pass(&snap());
    assert!(plan.avatars.iter().all(|a| a.href.is_none()));

    let mut conductor = RenderConductor::new(EngineConfig::for_user_agent(chrome));
    let plan = conductor.render_pass(&snap());
    assert!(plan.avatars.iter().all(|a| a.href.is_some()));
}

#[test]
fn test_capacity_is_per_roster_not_global() {
    let config = EngineConfig {
        avatar_limit: 5,
        header_cost: 1,
        ..EngineConfig::default()
    };
    let mut conductor = RenderConductor::new(config);
    let snap = page(
        vec![],
        vec![
            list(
                "roster-a",
                None,
                vec![group(
                    "a-thumbs",
                    "u1, u2, u3, u4, u5, u6, u7, u8, u9 and u10 reacted with 👍",
                )],
            ),
            list(
                "roster-b",
                None,
                vec![
                    group("b-heart", "b1, b2 and b3 reacted with ❤️"),
                    group("b-laugh", "c1, c2 and c3 reacted with 😄"),
                ],
            ),
        ],
        1.0,
    );

    let plan = conductor.render_pass(&snap);

    let a_count = plan
        .avatars
        .iter()
        .filter(|a| a.group_id.starts_with("a-"))
        .count();
    let b_names: Vec<&str> = plan
        .avatars
        .iter()
        .filter(|a| a.group_id.starts_with("b-"))
        .map(|a| a.username.as_str())
        .collect();

    // roster-a: 5 - 1 = 4; roster-b: 5 - 2 = 3, interleaved.
    assert_eq!(a_count, 4);
    assert_eq!(b_names, vec!["b1", "c1", "b2"]);
    assert_eq!(plan.lists[0].capacity, 4);
    assert_eq!(plan.lists[1].capacity, 3);
}

#[test]
fn test_summary_shapes_survive_the_pipeline() {
    let mut conductor = RenderConductor::default();
    let snap = page(
        vec![],
        vec![list(
            "comment-1-reactions",
            None,
            vec![
                group("g-tada", "nadia, omar, and 12 more reacted with 🎉"),
                group("g-eyes", "pria reacted with 👀"),
            ],
        )],
        1.0,
    );

    let plan = conductor.render_pass(&snap);

    let names: Vec<&str> = plan.avatars.iter().map(|a| a.username.as_str()).collect();
    assert_eq!(names, vec!["nadia", "pria", "omar"]);
    // The overflow tail names nobody; it must never leak into a username.
    assert!(names.iter().all(|n| !n.contains("more")));
}
