/// Hand-assembled reply to whatever query the mock server received.
#[derive(Debug, Clone, Default)]
pub struct MockReply {
    rcode: u8,
    authenticated: bool,
    truncated: bool,
    id_override: Option<u16>,
    answers: Vec<(u16, Vec<u8>)>,
}

impl MockReply {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nxdomain() -> Self {
        Self {
            rcode: 3,
            ..Self::default()
        }
    }

    pub fn authenticated(mut self) -> Self {
        self.authenticated = true;
        self
    }

    pub fn truncated(mut self) -> Self {
        self.truncated = true;
        self
    }

    pub fn with_id(mut self, id: u16) -> Self {
        self.id_override = Some(id);
        self
    }

    /// Answer owned by the query name (compression pointer to offset 12).
    pub fn answer(mut self, rr_type: u16, rdata: impl Into<Vec<u8>>) -> Self {
        self.answers.push((rr_type, rdata.into()));
        self
    }

    pub fn render(&self, query: &[u8]) -> Vec<u8> {
        let question_end = question_end(query).unwrap_or(query.len());

        let mut response = Vec::with_capacity(512);

        match self.id_override {
            Some(id) => response.extend_from_slice(&id.to_be_bytes()),
            None => response.extend_from_slice(&query[0..2]),
        }

        response.push(0x81 | if self.truncated { 0x02 } else { 0 });
        response.push(0x80 | if self.authenticated { 0x20 } else { 0 } | self.rcode);

        response.extend_from_slice(&[0x00, 0x01]);
        response.extend_from_slice(&(self.answers.len() as u16).to_be_bytes());
        response.extend_from_slice(&[0x00, 0x00]);
        response.extend_from_slice(&[0x00, 0x00]);

        response.extend_from_slice(&query[12..question_end]);

        for (rr_type, rdata) in &self.answers {
            response.extend_from_slice(&[0xc0, 0x0c]);
            response.extend_from_slice(&rr_type.to_be_bytes());
            response.extend_from_slice(&[0x00, 0x01]);
            response.extend_from_slice(&300u32.to_be_bytes());
            response.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
            response.extend_from_slice(rdata);
        }

        response
    }
}

fn question_end(query: &[u8]) -> Option<usize> {
    let mut pos = 12;
    loop {
        let len = *query.get(pos)? as usize;
        pos += 1;
        if len == 0 {
            break;
        }
        pos += len;
    }
    let end = pos + 4;
    (end <= query.len()).then_some(end)
}

pub fn question_type(query: &[u8]) -> Option<u16> {
    let end = question_end(query)?;
    Some(u16::from_be_bytes([query[end - 4], query[end - 3]]))
}

/// Flags of the OPT record appended to the query, if any.
pub fn opt_flags(query: &[u8]) -> Option<u16> {
    let end = question_end(query)?;
    let opt = query.get(end..end + 11)?;
    (opt[0] == 0 && opt[1..3] == [0x00, 0x29]).then(|| u16::from_be_bytes([opt[7], opt[8]]))
}
