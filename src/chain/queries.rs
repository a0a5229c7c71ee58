// GraphQL documents sent to the upstream endpoint. Variables are bound at
// call time; the transaction listing is ordered by descending block height
// then descending in-block index, which fixes which transactions a window
// page surfaces first across repeated runs.

pub const TRANSACTIONS_QUERY: &str = r#"
query ($network: BitcoinNetwork!, $limit: Int!, $offset: Int!, $from: ISO8601DateTime, $till: ISO8601DateTime) {
  bitcoin(network: $network) {
    transactions(
      options: {desc: ["block.height", "index"], limit: $limit, offset: $offset}
      time: {since: $from, till: $till}
    ) {
      block {
        timestamp {
          time(format: "%Y-%m-%d %H:%M:%S")
        }
        height
      }
      inputValue
      inputCount
      outputCount
      index
      hash
      feeValue
    }
  }
}
"#;

pub const INPUTS_QUERY: &str = r#"
query ($hash: String!) {
  bitcoin {
    inputs(txHash: {is: $hash}) {
      inputAddress {
        address
      }
      value
    }
  }
}
"#;

pub const OUTPUTS_QUERY: &str = r#"
query ($hash: String!) {
  bitcoin {
    outputs(txHash: {is: $hash}) {
      outputAddress {
        address
      }
      value
    }
  }
}
"#;
