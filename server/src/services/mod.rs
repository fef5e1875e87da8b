pub mod member_aggregator;
