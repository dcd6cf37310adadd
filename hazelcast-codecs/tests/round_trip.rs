//! Property tests: every decoder recovers what its encoder wrote.

use proptest::prelude::*;
use uuid::Uuid;

use hazelcast_codecs::atomic_long;
use hazelcast_codecs::client::{add_cluster_view_listener, authentication};
use hazelcast_codecs::map::{add_entry_listener, put, put_all};
use hazelcast_codecs::pn_counter::{self, add as counter_add, get as counter_get};
use hazelcast_codecs::queue::{self, offer, poll};
use hazelcast_codecs::topic::add_message_listener;
use hazelcast_codecs::transaction;
use hazelcast_codecs::transactional_map;
use hazelcast_protocol::codec::custom::{Address, MemberInfo, MemberVersion, RaftGroupId};
use hazelcast_protocol::Data;

fn uuid() -> impl Strategy<Value = Uuid> {
    any::<u128>().prop_map(Uuid::from_u128)
}

fn blob() -> impl Strategy<Value = Data> {
    prop::collection::vec(any::<u8>(), 0..48).prop_map(Data::from)
}

fn address() -> impl Strategy<Value = Address> {
    ("[a-z0-9.]{1,24}", any::<i32>()).prop_map(|(host, port)| Address::new(host, port))
}

fn raft_group() -> impl Strategy<Value = RaftGroupId> {
    ("[a-z]{1,12}", any::<i64>(), any::<i64>()).prop_map(|(name, seed, id)| RaftGroupId {
        name,
        seed,
        id,
    })
}

fn member() -> impl Strategy<Value = MemberInfo> {
    (
        address(),
        uuid(),
        prop::collection::vec(("[a-z]{1,8}", ".{0,8}"), 0..3),
        any::<bool>(),
        any::<(u8, u8, u8)>(),
    )
        .prop_map(|(address, uuid, attributes, lite_member, (major, minor, patch))| MemberInfo {
            address,
            uuid,
            attributes,
            lite_member,
            version: MemberVersion {
                major,
                minor,
                patch,
            },
        })
}

proptest! {
    #[test]
    fn prop_map_put(
        name in ".{0,32}",
        key in blob(),
        value in blob(),
        thread_id in any::<i64>(),
        ttl in any::<i64>(),
        previous in prop::option::of(blob()),
    ) {
        let params = put::decode_request(&put::encode_request(&name, &key, &value, thread_id, ttl)).unwrap();
        prop_assert_eq!(params.name, name);
        prop_assert_eq!(params.key, key);
        prop_assert_eq!(params.value, value);
        prop_assert_eq!(params.thread_id, thread_id);
        prop_assert_eq!(params.ttl, ttl);

        let response = put::decode_response(&put::encode_response(previous.as_ref())).unwrap();
        prop_assert_eq!(response.response, previous);
    }

    #[test]
    fn prop_map_put_all(
        entries in prop::collection::vec((blob(), blob()), 0..16),
        trigger in any::<bool>(),
    ) {
        let params = put_all::decode_request(&put_all::encode_request("m", &entries, trigger)).unwrap();
        prop_assert_eq!(params.entries, entries);
        prop_assert_eq!(params.trigger_map_loader, trigger);
    }

    #[test]
    fn prop_authentication_request(
        cluster_name in ".{0,16}",
        username in prop::option::of(".{0,16}"),
        password in prop::option::of(".{0,16}"),
        client_uuid in prop::option::of(uuid()),
        serialization_version in any::<u8>(),
        labels in prop::collection::vec(".{0,8}", 0..4),
    ) {
        let params = authentication::RequestParameters {
            cluster_name,
            username,
            password,
            uuid: client_uuid,
            client_type: "RST".to_string(),
            serialization_version,
            client_hazelcast_version: "5.3.0".to_string(),
            client_name: "client-1".to_string(),
            labels,
        };
        let decoded = authentication::decode_request(&authentication::encode_request(&params)).unwrap();
        prop_assert_eq!(decoded, params);
    }

    #[test]
    fn prop_members_view_event(version in any::<i32>(), members in prop::collection::vec(member(), 0..4)) {
        let event = add_cluster_view_listener::MembersViewEvent { version, member_infos: members };
        let message = add_cluster_view_listener::encode_members_view_event(&event);
        prop_assert_eq!(
            add_cluster_view_listener::decode_event(&message).unwrap(),
            Some(add_cluster_view_listener::Event::MembersView(event))
        );
    }

    #[test]
    fn prop_partitions_view_event(
        version in any::<i32>(),
        partitions in prop::collection::vec((uuid(), prop::collection::vec(any::<i32>(), 0..8)), 0..6),
    ) {
        let event = add_cluster_view_listener::PartitionsViewEvent { version, partitions };
        let message = add_cluster_view_listener::encode_partitions_view_event(&event);
        prop_assert_eq!(
            add_cluster_view_listener::decode_event(&message).unwrap(),
            Some(add_cluster_view_listener::Event::PartitionsView(event))
        );
    }

    #[test]
    fn prop_entry_event(
        key in prop::option::of(blob()),
        value in prop::option::of(blob()),
        old_value in prop::option::of(blob()),
        merging_value in prop::option::of(blob()),
        event_type in any::<i32>(),
        member in uuid(),
        affected in any::<i32>(),
    ) {
        let event = add_entry_listener::EntryEvent {
            key,
            value,
            old_value,
            merging_value,
            event_type,
            uuid: member,
            number_of_affected_entries: affected,
        };
        let message = add_entry_listener::encode_entry_event(&event);
        prop_assert_eq!(
            add_entry_listener::decode_event(&message).unwrap(),
            Some(add_entry_listener::Event::Entry(event))
        );
    }

    #[test]
    fn prop_counter_get(
        clock in prop::collection::vec((uuid(), any::<i64>()), 0..8),
        target in prop::option::of(address()),
        value in any::<i64>(),
        replica_count in any::<i32>(),
    ) {
        let request = counter_get::encode_request("c", &clock, target.as_ref());
        let params = counter_get::decode_request(&request).unwrap();
        prop_assert_eq!(&params.replica_timestamps, &clock);
        prop_assert_eq!(params.target_replica, target);

        let response = pn_counter::CounterResponse { value, replica_timestamps: clock, replica_count };
        let decoded = counter_get::decode_response(&counter_get::encode_response(&response)).unwrap();
        prop_assert_eq!(decoded, response);
    }

    #[test]
    fn prop_transactional_map_conventions(
        previous in prop::option::of(blob()),
        keys in prop::collection::vec(blob(), 0..10),
    ) {
        let message = transactional_map::put::encode_response(previous.as_ref());
        let decoded = transactional_map::put::decode_response(&message).unwrap();
        prop_assert_eq!(decoded.response, previous);

        let message = transactional_map::key_set::encode_response(&keys);
        prop_assert_eq!(message.frame_count(), keys.len() + 2);
        let decoded = transactional_map::key_set::decode_response(&message).unwrap();
        prop_assert_eq!(decoded.response, keys);
    }

    #[test]
    fn prop_queue_offer_poll(
        name in ".{0,16}",
        value in blob(),
        timeout in any::<i64>(),
        accepted in any::<bool>(),
        head in prop::option::of(blob()),
    ) {
        let params = offer::decode_request(&offer::encode_request(&name, &value, timeout)).unwrap();
        prop_assert_eq!(params.name, name.clone());
        prop_assert_eq!(params.value, value);
        prop_assert_eq!(params.timeout_millis, timeout);
        prop_assert_eq!(offer::decode_response(&offer::encode_response(accepted)).unwrap().response, accepted);

        let params = poll::decode_request(&poll::encode_request(&name, timeout)).unwrap();
        prop_assert_eq!(params.name, name);
        prop_assert_eq!(params.timeout_millis, timeout);
        let decoded = poll::decode_response(&poll::encode_response(head.as_ref())).unwrap();
        prop_assert_eq!(decoded.response, head);
    }

    #[test]
    fn prop_atomic_long(
        group in raft_group(),
        name in "[a-z]{0,16}",
        delta in any::<i64>(),
        expected in any::<i64>(),
        updated in any::<i64>(),
        swapped in any::<bool>(),
    ) {
        let request = atomic_long::add_and_get::encode_request(&group, &name, delta);
        let params = atomic_long::add_and_get::decode_request(&request).unwrap();
        prop_assert_eq!(&params.group_id, &group);
        prop_assert_eq!(params.delta, delta);
        let response = atomic_long::add_and_get::encode_response(updated);
        prop_assert_eq!(atomic_long::add_and_get::decode_response(&response).unwrap().response, updated);

        let request = atomic_long::compare_and_set::encode_request(&group, &name, expected, updated);
        let params = atomic_long::compare_and_set::decode_request(&request).unwrap();
        prop_assert_eq!((params.expected, params.updated), (expected, updated));
        prop_assert_eq!(&params.name, &name);
        let response = atomic_long::compare_and_set::encode_response(swapped);
        prop_assert_eq!(atomic_long::compare_and_set::decode_response(&response).unwrap().response, swapped);

        let params = atomic_long::get::decode_request(&atomic_long::get::encode_request(&group, &name)).unwrap();
        prop_assert_eq!(params.group_id, group);
        let response = atomic_long::get::encode_response(expected);
        prop_assert_eq!(atomic_long::get::decode_response(&response).unwrap().response, expected);
    }

    #[test]
    fn prop_listener_registrations(
        name in ".{0,16}",
        local_only in any::<bool>(),
        include_value in any::<bool>(),
        registration in uuid(),
    ) {
        let params = add_message_listener::decode_request(
            &add_message_listener::encode_request(&name, local_only),
        ).unwrap();
        prop_assert_eq!((params.name, params.local_only), (name.clone(), local_only));
        let response = add_message_listener::encode_response(registration);
        prop_assert_eq!(add_message_listener::decode_response(&response).unwrap().response, registration);

        let params = queue::add_listener::decode_request(
            &queue::add_listener::encode_request(&name, include_value, local_only),
        ).unwrap();
        prop_assert_eq!(params.include_value, include_value);
        let response = queue::add_listener::encode_response(registration);
        prop_assert_eq!(queue::add_listener::decode_response(&response).unwrap().response, registration);
    }

    #[test]
    fn prop_transaction_lifecycle(id in uuid(), thread_id in any::<i64>()) {
        let params = transaction::rollback::decode_request(
            &transaction::rollback::encode_request(id, thread_id),
        ).unwrap();
        prop_assert_eq!((params.transaction_id, params.thread_id), (id, thread_id));
        prop_assert!(transaction::rollback::decode_response(&transaction::rollback::encode_response()).is_ok());

        let params = transaction::commit::decode_request(
            &transaction::commit::encode_request(id, thread_id),
        ).unwrap();
        prop_assert_eq!((params.transaction_id, params.thread_id), (id, thread_id));
        prop_assert!(transaction::commit::decode_response(&transaction::commit::encode_response()).is_ok());

        let response = transaction::create::encode_response(id);
        prop_assert_eq!(transaction::create::decode_response(&response).unwrap().response, id);
    }

    #[test]
    fn prop_counter_add(
        name in "[a-z]{1,8}",
        delta in any::<i64>(),
        before in any::<bool>(),
        clock in prop::collection::vec((uuid(), any::<i64>()), 0..8),
        target in prop::option::of(address()),
        value in any::<i64>(),
        replica_count in any::<i32>(),
    ) {
        let request = counter_add::encode_request(&name, delta, before, &clock, target.as_ref());
        let params = counter_add::decode_request(&request).unwrap();
        prop_assert_eq!(params.delta, delta);
        prop_assert_eq!(params.get_before_update, before);
        prop_assert_eq!(&params.replica_timestamps, &clock);
        prop_assert_eq!(params.target_replica, target);

        let response = pn_counter::CounterResponse { value, replica_timestamps: clock, replica_count };
        let decoded = counter_add::decode_response(&counter_add::encode_response(&response)).unwrap();
        prop_assert_eq!(decoded, response);
    }
}
