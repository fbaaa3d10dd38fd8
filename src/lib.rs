pub mod core {
    pub mod game;
    pub mod ports;
    pub mod roster;
    pub mod stats;
    pub mod team;
}

pub mod application {
    pub mod errors;
    pub mod live_ticker;
    pub mod session;
    pub mod command_handlers {
        pub mod event_log_handler;
        pub mod game_changes;
        pub mod game_clock_handler;
        pub mod lineup_handler;
        pub mod roster_handler;
        pub mod saved_lineup_handler;
        pub mod schedule_handler;
        pub mod session_handler;
    }
    pub mod query_handlers {
        pub mod game_queries;
        pub mod stats_queries;
    }
}

pub mod adapters {
    pub mod in_memory {
        pub mod in_memory_database;
        pub mod static_token_authenticator;
    }
    pub mod inbound {
        pub mod graphql;
        pub mod http {
            pub mod error_response;
            pub mod events;
            pub mod games;
            pub mod lineup;
            pub mod roster;
            pub mod saved_lineups;
            pub mod session;
            pub mod stats;
        }
    }
}

pub mod shell;

#[cfg(test)]
pub mod test_support {
    pub mod fixtures;
}
