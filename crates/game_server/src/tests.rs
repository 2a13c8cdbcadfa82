
// Include tests
#[cfg(test)]
mod tests {
    use crate::registry::{PlayerKey, PlayerRegistry, Position};
    use crate::server::handle_session;
    use std::net::SocketAddr;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
    use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
    use tokio::net::{TcpListener, TcpStream};

    /// Binds an ephemeral port and runs the accept loop with a fresh
    /// registry, exactly as the server core does.
    async fn spawn_server() -> (SocketAddr, Arc<PlayerRegistry>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let registry = Arc::new(PlayerRegistry::new());

        let accept_registry = registry.clone();
        tokio::spawn(async move {
            loop {
                let Ok((stream, peer)) = listener.accept().await else {
                    break;
                };
                let registry = accept_registry.clone();
                tokio::spawn(async move {
                    let _ = handle_session(stream, peer, registry).await;
                });
            }
        });

        (addr, registry)
    }

    struct TestClient {
        lines: tokio::io::Lines<BufReader<OwnedReadHalf>>,
        writer: OwnedWriteHalf,
        key: PlayerKey,
    }

    impl TestClient {
        async fn connect(addr: SocketAddr) -> Self {
            let stream = TcpStream::connect(addr).await.unwrap();
            let key = PlayerKey::from(stream.local_addr().unwrap());
            let (reader, writer) = stream.into_split();
            Self {
                lines: BufReader::new(reader).lines(),
                writer,
                key,
            }
        }

        async fn send(&mut self, line: &str) {
            self.writer
                .write_all(format!("{line}\n").as_bytes())
                .await
                .unwrap();
        }

        async fn recv(&mut self) -> String {
            tokio::time::timeout(Duration::from_secs(5), self.lines.next_line())
                .await
                .expect("timed out waiting for a reply")
                .unwrap()
                .expect("server closed the stream unexpectedly")
        }

        async fn expect_eof(&mut self) {
            let next = tokio::time::timeout(Duration::from_secs(5), self.lines.next_line())
                .await
                .expect("timed out waiting for stream end")
                .unwrap();
            assert_eq!(next, None, "expected the server to close the stream");
        }
    }

    /// MOVE produces no reply, so position changes are observed by
    /// polling the registry.
    async fn wait_for_position(registry: &PlayerRegistry, key: PlayerKey, expected: Position) {
        for _ in 0..500 {
            if registry.get(key).await.map(|p| p.position) == Some(expected) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("registry never reached position {expected} for {key}");
    }

    async fn wait_for_absent(registry: &PlayerRegistry, key: PlayerKey) {
        for _ in 0..500 {
            if !registry.contains(key).await {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("registry entry for {key} was never removed");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn join_move_leave_round_trip() {
        let (addr, registry) = spawn_server().await;
        let mut client = TestClient::connect(addr).await;

        client.send("JOIN:Alice").await;
        assert_eq!(client.recv().await, "WELCOME:Alice");

        client.send("MOVE:10,-5,3").await;
        wait_for_position(&registry, client.key, Position::new(10, -5, 3)).await;

        client.send("LEAVE:").await;
        assert_eq!(client.recv().await, "GOODBYE:Alice");
        client.expect_eof().await;

        wait_for_absent(&registry, client.key).await;
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn duplicate_join_keeps_the_first_nickname() {
        let (addr, registry) = spawn_server().await;
        let mut client = TestClient::connect(addr).await;

        client.send("JOIN:Alice").await;
        assert_eq!(client.recv().await, "WELCOME:Alice");

        client.send("JOIN:Bob").await;
        assert_eq!(client.recv().await, "ERROR:Already joined");

        assert_eq!(registry.get(client.key).await.unwrap().nickname, "Alice");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn commands_before_join_are_rejected() {
        let (addr, registry) = spawn_server().await;
        let mut client = TestClient::connect(addr).await;

        client.send("MOVE:1,2,3").await;
        assert_eq!(client.recv().await, "ERROR:Not joined");

        client.send("LEAVE:").await;
        assert_eq!(client.recv().await, "ERROR:Not joined");

        assert!(registry.is_empty().await);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn invalid_coordinates_leave_the_position_untouched() {
        let (addr, registry) = spawn_server().await;
        let mut client = TestClient::connect(addr).await;

        client.send("JOIN:Alice").await;
        assert_eq!(client.recv().await, "WELCOME:Alice");

        client.send("MOVE:10,20,30").await;
        wait_for_position(&registry, client.key, Position::new(10, 20, 30)).await;

        client.send("MOVE:a,b,c").await;
        assert_eq!(client.recv().await, "ERROR:Invalid coordinates");

        assert_eq!(
            registry.get(client.key).await.unwrap().position,
            Position::new(10, 20, 30)
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn malformed_input_does_not_kill_the_session() {
        let (addr, _registry) = spawn_server().await;
        let mut client = TestClient::connect(addr).await;

        client.send("this line has no separator").await;
        assert_eq!(client.recv().await, "ERROR:Malformed line");

        client.send("FLY:1,2,3").await;
        assert_eq!(client.recv().await, "ERROR:Unknown command: FLY");

        // The session survived both rejections.
        client.send("JOIN:Alice").await;
        assert_eq!(client.recv().await, "WELCOME:Alice");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn abrupt_disconnect_removes_the_player() {
        let (addr, registry) = spawn_server().await;
        let mut client = TestClient::connect(addr).await;

        client.send("JOIN:Alice").await;
        assert_eq!(client.recv().await, "WELCOME:Alice");
        let key = client.key;
        assert_eq!(registry.len().await, 1);

        // Drop without LEAVE; the handler must clean up on EOF.
        drop(client);
        wait_for_absent(&registry, key).await;
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrent_sessions_are_isolated() {
        let (addr, registry) = spawn_server().await;
        let mut alice = TestClient::connect(addr).await;
        let mut bob = TestClient::connect(addr).await;

        alice.send("JOIN:Alice").await;
        bob.send("JOIN:Bob").await;
        assert_eq!(alice.recv().await, "WELCOME:Alice");
        assert_eq!(bob.recv().await, "WELCOME:Bob");
        assert_eq!(registry.len().await, 2);

        // Alice's traffic must never show up on Bob's stream: the very
        // next line Bob reads is his own GOODBYE.
        alice.send("MOVE:7,8,9").await;
        wait_for_position(&registry, alice.key, Position::new(7, 8, 9)).await;

        alice.send("LEAVE:").await;
        assert_eq!(alice.recv().await, "GOODBYE:Alice");

        bob.send("LEAVE:").await;
        assert_eq!(bob.recv().await, "GOODBYE:Bob");

        wait_for_absent(&registry, alice.key).await;
        wait_for_absent(&registry, bob.key).await;
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn carriage_returns_are_tolerated() {
        let (addr, _registry) = spawn_server().await;
        let mut client = TestClient::connect(addr).await;

        client
            .writer
            .write_all(b"JOIN:Alice\r\n")
            .await
            .unwrap();
        assert_eq!(client.recv().await, "WELCOME:Alice");
    }
}
